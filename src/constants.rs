// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the API concept it pins down. Reading these
//! should tell you which Notion API the client speaks, how it authenticates,
//! and how much it is willing to keep in memory.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL every endpoint path is joined onto.
pub const API_BASE_URL: &str = "https://api.notion.com/v1/";

/// The dated API version sent with every request.
pub const API_VERSION: &str = "2022-06-28";

/// Header carrying [`API_VERSION`] (or the configured override).
pub const API_VERSION_HEADER: &str = "Notion-Version";

/// Environment variable consulted when no token is passed explicitly.
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// How many objects the Notion API returns per page of query results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Transport defaults
// ---------------------------------------------------------------------------

/// Seconds to wait for a single request before giving up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Extra attempts made after a connection-level failure.
pub const DEFAULT_RETRIES: u32 = 0;

// ---------------------------------------------------------------------------
// Response cache
// ---------------------------------------------------------------------------

/// Number of GET responses kept in a client's LRU cache.
pub const RESPONSE_CACHE_CAPACITY: usize = 128;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing response bodies in errors and logs.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
