// src/api/client.rs
//! Blocking client for the Notion API.
//!
//! Every call is one round trip through the [`Transport`] (two for a
//! database update that also deletes properties). Responses are decoded into
//! the typed model; non-2xx responses become `AppError::Api` when the body
//! carries Notion's `{code, message}` error object and `AppError::Transport`
//! otherwise.

use super::cache::{CacheInfo, ResponseCache};
use super::endpoint::{ApiEndpoint, Method};
use super::pagination::{PageBatch, PageStream};
use super::transport::{HttpTransport, Transport, WireRequest, WireResponse};
use crate::config::ClientConfig;
use crate::constants::RESPONSE_CACHE_CAPACITY;
use crate::error::{AppError, HttpFailure, NotionErrorCode, Result};
use crate::logging;
use crate::model::{Block, Comment, Database, FromWire, Page, ToWire, User};
use serde_json::{Map, Value};

pub struct NotionClient {
    transport: Box<dyn Transport>,
    cache: ResponseCache,
    config: ClientConfig,
}

impl NotionClient {
    /// Creates a client talking HTTP to the configured base URL.
    ///
    /// The token is resolved before anything touches the network: the
    /// explicit argument wins, then the environment variable named in the
    /// configuration. Having neither is an `AppError::Config`.
    pub fn new(token: Option<&str>, config: ClientConfig) -> Result<Self> {
        if let Some(level) = config.log_level {
            logging::init_console(level);
        }
        let token = config.resolve_token(token)?;
        let transport = HttpTransport::new(&config, &token)?;
        log::debug!("Notion client ready for {}", config.base_url);
        Ok(Self::with_transport(transport, config))
    }

    /// Creates a client over any transport. No token handling happens here.
    pub fn with_transport(transport: impl Transport + 'static, config: ClientConfig) -> Self {
        Self {
            transport: Box::new(transport),
            cache: ResponseCache::new(RESPONSE_CACHE_CAPACITY),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Raw requests
    // -----------------------------------------------------------------------

    /// Sends one request and returns the decoded JSON body.
    ///
    /// Only GET requests are cached, and only when `use_cache` is set.
    pub fn execute(&self, request: &WireRequest, use_cache: bool) -> Result<Value> {
        let cache_key = (use_cache && request.method == Method::Get)
            .then(|| ResponseCache::key(&request.path, &request.query));

        if let Some(key) = &cache_key {
            if let Some(hit) = self.cache.get(key) {
                return Ok(hit);
            }
        }

        let response = self.transport.send(request)?;
        let value = Self::parse_response(response)?;

        if let Some(key) = cache_key {
            self.cache.put(key, value.clone());
        }
        Ok(value)
    }

    fn call(
        &self,
        endpoint: ApiEndpoint,
        id: &str,
        body: Option<Value>,
        use_cache: bool,
    ) -> Result<Value> {
        let mut request = WireRequest::new(endpoint.method(), endpoint.path(id));
        request.body = body;
        self.execute(&request, use_cache)
    }

    fn parse_response(response: WireResponse) -> Result<Value> {
        if response.is_success() {
            return serde_json::from_str(&response.body)
                .map_err(|e| AppError::malformed("response body", e));
        }

        let failure = HttpFailure {
            status: response.status,
            headers: response.headers,
            body: response.body,
        };
        let error_object = serde_json::from_str::<Value>(&failure.body)
            .ok()
            .and_then(|body| {
                let code = body.get("code")?.as_str()?.to_string();
                let message = body.get("message")?.as_str()?.to_string();
                Some((code, message))
            });

        match error_object {
            Some((code, message)) => {
                log::warn!("Notion API error {} ({}): {}", failure.status, code, message);
                Err(AppError::Api {
                    failure,
                    code: NotionErrorCode::from_api_response(&code),
                    message,
                })
            }
            None => {
                log::warn!(
                    "Request failed with status {}: {}",
                    failure.status,
                    failure.body_preview()
                );
                Err(AppError::Transport(failure))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Databases
    // -----------------------------------------------------------------------

    pub fn retrieve_database(&self, id: &str, use_cache: bool) -> Result<Database> {
        let record = self.call(ApiEndpoint::DatabaseRetrieve, id, None, use_cache)?;
        Database::from_wire(&record)
    }

    /// Runs a database query and returns the raw response. Never cached.
    pub fn query_database_raw(&self, id: &str, body: Value) -> Result<Value> {
        self.call(ApiEndpoint::DatabaseQuery, id, Some(body), false)
    }

    /// Runs a database query and decodes one batch of pages.
    pub fn query_database(&self, id: &str, body: Value) -> Result<PageBatch> {
        PageBatch::from_wire(&self.query_database_raw(id, body)?)
    }

    /// Lazily walks every page of a database. `max_pages` of 0 means no limit.
    pub fn pages(&self, database_id: &str, max_pages: usize) -> PageStream<'_> {
        PageStream::new(self, database_id, max_pages)
    }

    /// Writes a database back to Notion.
    ///
    /// The parent is never sent. Properties removed since the database was
    /// decoded are deleted in a second request, because Notion rejects
    /// deletions mixed with other property edits.
    pub fn update_database(&self, database: &Database) -> Result<Database> {
        let mut body = match database.to_wire()? {
            Value::Object(record) => record,
            other => {
                return Err(AppError::malformed(
                    "database",
                    format!("expected an object, got {}", other),
                ))
            }
        };
        body.remove("parent");

        let id = database.id();
        log::info!("Updating database {}", id);
        let mut response = self.call(
            ApiEndpoint::DatabaseUpdate,
            id,
            Some(Value::Object(body.clone())),
            false,
        )?;

        let deleted = database.deleted_property_ids();
        if !deleted.is_empty() {
            log::info!("Deleting {} properties from database {}", deleted.len(), id);
            let removals: Map<String, Value> =
                deleted.into_iter().map(|id| (id, Value::Null)).collect();
            body.insert("properties".to_string(), Value::Object(removals));
            response = self.call(
                ApiEndpoint::DatabaseUpdate,
                id,
                Some(Value::Object(body)),
                false,
            )?;
        }

        self.cache
            .remove(&ResponseCache::key(&ApiEndpoint::DatabaseRetrieve.path(id), &[]));
        Database::from_wire(&response)
    }

    pub fn create_database(&self, _body: Value) -> Result<Database> {
        Self::not_implemented(ApiEndpoint::DatabaseCreate)
    }

    // -----------------------------------------------------------------------
    // Pages, blocks, users
    // -----------------------------------------------------------------------

    pub fn retrieve_page(&self, id: &str, use_cache: bool) -> Result<Page> {
        let record = self.call(ApiEndpoint::PageRetrieve, id, None, use_cache)?;
        Page::from_wire(&record)
    }

    pub fn create_page(&self, _body: Value) -> Result<Page> {
        Self::not_implemented(ApiEndpoint::PageCreate)
    }

    pub fn update_page(&self, _page: &Page) -> Result<Page> {
        Self::not_implemented(ApiEndpoint::PageUpdate)
    }

    pub fn retrieve_block(&self, id: &str, use_cache: bool) -> Result<Block> {
        let record = self.call(ApiEndpoint::BlockRetrieve, id, None, use_cache)?;
        Block::from_wire(&record)
    }

    pub fn update_block(&self, _id: &str, _body: Value) -> Result<Block> {
        Self::not_implemented(ApiEndpoint::BlockUpdate)
    }

    pub fn delete_block(&self, _id: &str) -> Result<Block> {
        Self::not_implemented(ApiEndpoint::BlockDelete)
    }

    pub fn retrieve_block_children(&self, _id: &str) -> Result<Vec<Block>> {
        Self::not_implemented(ApiEndpoint::BlockChildren)
    }

    pub fn append_block_children(&self, _id: &str, _children: Value) -> Result<Vec<Block>> {
        Self::not_implemented(ApiEndpoint::BlockAppend)
    }

    pub fn retrieve_comments(&self, _block_id: &str) -> Result<Vec<Comment>> {
        Self::not_implemented(ApiEndpoint::CommentRetrieve)
    }

    pub fn create_comment(&self, _body: Value) -> Result<Comment> {
        Self::not_implemented(ApiEndpoint::CommentCreate)
    }

    pub fn retrieve_user(&self, id: &str, use_cache: bool) -> Result<User> {
        let record = self.call(ApiEndpoint::UserRetrieve, id, None, use_cache)?;
        User::from_wire(&record)
    }

    /// The bot user the token belongs to.
    pub fn retrieve_me(&self, use_cache: bool) -> Result<User> {
        let record = self.call(ApiEndpoint::UserMe, "", None, use_cache)?;
        User::from_wire(&record)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        Self::not_implemented(ApiEndpoint::UserList)
    }

    pub fn search(&self, _body: Value) -> Result<Value> {
        Self::not_implemented(ApiEndpoint::Search)
    }

    fn not_implemented<T>(endpoint: ApiEndpoint) -> Result<T> {
        Err(AppError::unsupported_by_library(format!(
            "{} {}",
            endpoint.method(),
            endpoint.template()
        )))
    }

    // -----------------------------------------------------------------------
    // Cache and lifetime
    // -----------------------------------------------------------------------

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_info(&self) -> CacheInfo {
        self.cache.info()
    }

    /// Releases the transport. Dropping the client does the same.
    pub fn close(self) {
        log::debug!("Closing Notion client ({} cached responses)", self.cache.info().size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Unsupported;

    fn response(status: u16, body: &str) -> WireResponse {
        WireResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_body_is_decoded() {
        let value = NotionClient::parse_response(response(200, r#"{"object":"user"}"#)).unwrap();
        assert_eq!(value["object"], "user");
    }

    #[test]
    fn test_invalid_success_body_is_malformed() {
        let err = NotionClient::parse_response(response(200, "not json")).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn test_error_object_becomes_api_error() {
        let err = NotionClient::parse_response(response(
            404,
            r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find database"}"#,
        ))
        .unwrap_err();
        match &err {
            AppError::Api { code, message, failure } => {
                assert_eq!(*code, NotionErrorCode::ObjectNotFound);
                assert_eq!(message, "Could not find database");
                assert_eq!(failure.status, 404);
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_unstructured_failure_becomes_transport_error() {
        let err = NotionClient::parse_response(response(502, "<html>Bad Gateway</html>")).unwrap_err();
        match err {
            AppError::Transport(failure) => {
                assert_eq!(failure.status, 502);
                assert_eq!(failure.body, "<html>Bad Gateway</html>");
            }
            other => panic!("expected Transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_stub_names_the_endpoint() {
        let err = NotionClient::not_implemented::<()>(ApiEndpoint::Search).unwrap_err();
        assert!(matches!(
            err,
            AppError::Unsupported(Unsupported::ByLibrary(ref what)) if what == "POST search"
        ));
    }
}
