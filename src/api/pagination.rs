// src/api/pagination.rs
//! Bounded, forward-only pagination over database queries.

use super::client::NotionClient;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::Result;
use crate::model::wire::{flag, list_of, opt_str, FromWire};
use crate::model::Page;
use serde_json::{json, Value};

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBatch {
    pub results: Vec<Page>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl FromWire for PageBatch {
    fn from_wire(record: &Value) -> Result<Self> {
        Ok(PageBatch {
            results: list_of(record, "results")?,
            next_cursor: opt_str(record, "next_cursor"),
            has_more: flag(record, "has_more"),
        })
    }
}

/// Lazily yields the pages of a database, one query per batch.
///
/// Stops when Notion reports no more results, when no cursor comes back, or
/// after `max_pages` pages (0 means no limit). An error ends the stream after
/// it is yielded. Nothing is snapshotted: pages edited while iterating may
/// show up in either state.
pub struct PageStream<'c> {
    client: &'c NotionClient,
    database_id: String,
    max_pages: usize,
    yielded: usize,
    buffer: std::vec::IntoIter<Page>,
    cursor: Option<String>,
    exhausted: bool,
}

impl<'c> PageStream<'c> {
    pub(crate) fn new(client: &'c NotionClient, database_id: &str, max_pages: usize) -> Self {
        Self {
            client,
            database_id: database_id.to_string(),
            max_pages,
            yielded: 0,
            buffer: Vec::new().into_iter(),
            cursor: None,
            exhausted: false,
        }
    }

    fn limit_reached(&self) -> bool {
        self.max_pages > 0 && self.yielded >= self.max_pages
    }

    fn query_body(&self) -> Value {
        let page_size = if self.max_pages > 0 {
            (self.max_pages - self.yielded).min(NOTION_API_PAGE_SIZE)
        } else {
            NOTION_API_PAGE_SIZE
        };
        let mut body = json!({ "page_size": page_size });
        if let Some(cursor) = &self.cursor {
            body["start_cursor"] = json!(cursor);
        }
        body
    }

    fn fetch_next_batch(&mut self) -> Result<()> {
        let batch = self
            .client
            .query_database(&self.database_id, self.query_body())?;
        log::debug!(
            "Fetched {} pages from database {} (has_more: {})",
            batch.results.len(),
            self.database_id,
            batch.has_more
        );
        self.exhausted = !batch.has_more || batch.next_cursor.is_none();
        self.cursor = batch.next_cursor;
        self.buffer = batch.results.into_iter();
        Ok(())
    }
}

impl Iterator for PageStream<'_> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.limit_reached() {
                log::debug!("Reached maximum page limit: {}", self.max_pages);
                return None;
            }
            if let Some(page) = self.buffer.next() {
                self.yielded += 1;
                return Some(Ok(page));
            }
            if self.exhausted {
                return None;
            }
            if let Err(e) = self.fetch_next_batch() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
    }
}
