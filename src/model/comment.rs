use super::object::ObjectBase;
use super::rich_text::{plain_text_of, RichText};
use super::wire::{opt_list_of, opt_str, FromWire};
use crate::error::Result;
use crate::types::ObjectType;
use serde_json::Value;

/// A comment on a page or in a discussion thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub base: ObjectBase,
    pub discussion_id: Option<String>,
    pub rich_text: Vec<RichText>,
}

impl Comment {
    pub fn text(&self) -> String {
        plain_text_of(&self.rich_text)
    }
}

impl FromWire for Comment {
    fn from_wire(record: &Value) -> Result<Self> {
        Ok(Comment {
            base: ObjectBase::decode(record, ObjectType::Comment)?,
            discussion_id: opt_str(record, "discussion_id"),
            rich_text: opt_list_of(record, "rich_text")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comment_text() {
        let comment = Comment::from_wire(&json!({
            "object": "comment",
            "id": "c1",
            "discussion_id": "d1",
            "parent": {"type": "page_id", "page_id": "p1"},
            "rich_text": [{"type": "text", "text": {"content": "Looks good"}, "plain_text": "Looks good"}]
        }))
        .unwrap();
        assert_eq!(comment.text(), "Looks good");
        assert_eq!(comment.discussion_id.as_deref(), Some("d1"));
    }
}
