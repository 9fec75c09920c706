use super::object::ObjectBase;
use super::wire::{flag, tag_of, FromWire};
use crate::error::Result;
use crate::types::ObjectType;
use serde_json::Value;

/// A block, read only for its shared fields. Block content is not modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub base: ObjectBase,
    /// Raw block type tag, such as `paragraph` or `to_do`.
    pub block_type: String,
    pub has_children: bool,
}

impl FromWire for Block {
    fn from_wire(record: &Value) -> Result<Self> {
        Ok(Block {
            base: ObjectBase::decode(record, ObjectType::Block)?,
            block_type: tag_of(record).to_string(),
            has_children: flag(record, "has_children"),
        })
    }
}

impl Block {
    pub fn id(&self) -> &str {
        &self.base.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_shared_fields() {
        let block = Block::from_wire(&json!({
            "object": "block",
            "id": "blk",
            "type": "paragraph",
            "has_children": true,
            "archived": false,
            "paragraph": {"rich_text": []}
        }))
        .unwrap();
        assert_eq!(block.id(), "blk");
        assert_eq!(block.block_type, "paragraph");
        assert!(block.has_children);
    }
}
