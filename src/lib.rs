// src/lib.rs
//! notionkit: a typed, blocking client for the Notion API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NotionErrorCode`, `HttpFailure`, `Unsupported`
//! - **Configuration**: `ClientConfig`
//! - **Wire enumerations**: `Color`, `PropType`, `ObjectType` and friends, all
//!   resolving unknown tags to a fallback member
//! - **Domain model**: `Database`, `Page`, `User`, `Block`, `Comment`, rich
//!   text, schema properties, page property values and `Properties`
//! - **API client**: `NotionClient`, `PageStream`, the `Transport` seam

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod model;
pub mod types;

pub use crate::api::{CacheInfo, NotionClient, PageStream, Transport};
pub use crate::config::ClientConfig;
pub use crate::error::{AppError, HttpFailure, NotionErrorCode, Result, Unsupported};
pub use crate::model::{
    Block, Comment, Database, FromWire, Page, PropertyValue, Properties, RichText, SchemaProperty,
    ToWire, User,
};
