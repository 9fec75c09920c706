// src/api/mod.rs
//! Notion API interaction: endpoints, the HTTP boundary, response caching
//! and the client that ties them to the typed model.

mod cache;
mod client;
mod endpoint;
mod pagination;
mod transport;

pub use cache::CacheInfo;
pub use client::NotionClient;
pub use endpoint::{ApiEndpoint, Method};
pub use pagination::{PageBatch, PageStream};
pub use transport::{HttpTransport, Transport, WireRequest, WireResponse};
