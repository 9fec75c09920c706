// src/api/endpoint.rs
//! The Notion REST endpoints this client knows about.

use std::fmt;

/// HTTP verbs used by the Notion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An endpoint path template. `{}` is replaced with the object id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    DatabaseCreate,
    DatabaseRetrieve,
    DatabaseUpdate,
    DatabaseQuery,
    PageCreate,
    PageRetrieve,
    PageUpdate,
    BlockRetrieve,
    BlockUpdate,
    BlockDelete,
    BlockChildren,
    BlockAppend,
    CommentRetrieve,
    CommentCreate,
    UserList,
    UserRetrieve,
    UserMe,
    Search,
}

impl ApiEndpoint {
    pub fn template(&self) -> &'static str {
        match self {
            ApiEndpoint::DatabaseCreate => "databases",
            ApiEndpoint::DatabaseRetrieve | ApiEndpoint::DatabaseUpdate => "databases/{}",
            ApiEndpoint::DatabaseQuery => "databases/{}/query",
            ApiEndpoint::PageCreate => "pages",
            ApiEndpoint::PageRetrieve | ApiEndpoint::PageUpdate => "pages/{}",
            ApiEndpoint::BlockRetrieve | ApiEndpoint::BlockUpdate | ApiEndpoint::BlockDelete => {
                "blocks/{}"
            }
            ApiEndpoint::BlockChildren | ApiEndpoint::BlockAppend => "blocks/{}/children",
            ApiEndpoint::CommentRetrieve | ApiEndpoint::CommentCreate => "comments",
            ApiEndpoint::UserList => "users",
            ApiEndpoint::UserRetrieve => "users/{}",
            ApiEndpoint::UserMe => "users/me",
            ApiEndpoint::Search => "search",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            ApiEndpoint::DatabaseRetrieve
            | ApiEndpoint::PageRetrieve
            | ApiEndpoint::BlockRetrieve
            | ApiEndpoint::BlockChildren
            | ApiEndpoint::CommentRetrieve
            | ApiEndpoint::UserList
            | ApiEndpoint::UserRetrieve
            | ApiEndpoint::UserMe => Method::Get,
            ApiEndpoint::DatabaseCreate
            | ApiEndpoint::DatabaseQuery
            | ApiEndpoint::PageCreate
            | ApiEndpoint::CommentCreate
            | ApiEndpoint::Search => Method::Post,
            ApiEndpoint::DatabaseUpdate
            | ApiEndpoint::PageUpdate
            | ApiEndpoint::BlockUpdate
            | ApiEndpoint::BlockAppend => Method::Patch,
            ApiEndpoint::BlockDelete => Method::Delete,
        }
    }

    /// The path with `id` substituted. Templates without a slot ignore it.
    pub fn path(&self, id: &str) -> String {
        self.template().replacen("{}", id, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_substitution() {
        assert_eq!(ApiEndpoint::DatabaseQuery.path("abc"), "databases/abc/query");
        assert_eq!(ApiEndpoint::UserRetrieve.path("u1"), "users/u1");
        assert_eq!(ApiEndpoint::UserMe.path(""), "users/me");
        assert_eq!(ApiEndpoint::Search.path("ignored"), "search");
    }

    #[test]
    fn test_methods() {
        assert_eq!(ApiEndpoint::DatabaseRetrieve.method(), Method::Get);
        assert_eq!(ApiEndpoint::DatabaseQuery.method(), Method::Post);
        assert_eq!(ApiEndpoint::DatabaseUpdate.method(), Method::Patch);
        assert_eq!(ApiEndpoint::BlockDelete.method().to_string(), "DELETE");
    }
}
