use super::common::Parent;
use super::user::User;
use super::wire::{flag, opt_decode, opt_str, opt_timestamp, str_field, ToWire};
use crate::error::{AppError, Result};
use crate::types::{ObjectType, WireTag};
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Fields every top-level Notion object carries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectBase {
    pub id: String,
    pub created_time: Option<DateTime<FixedOffset>>,
    pub last_edited_time: Option<DateTime<FixedOffset>>,
    pub archived: bool,
    pub created_by: Option<User>,
    pub last_edited_by: Option<User>,
    pub parent: Option<Parent>,
}

impl ObjectBase {
    /// Reads the shared fields, checking the record's `object` tag when present.
    pub fn decode(record: &Value, expected: ObjectType) -> Result<Self> {
        if let Some(object) = opt_str(record, "object") {
            if ObjectType::from_wire(&object) != expected {
                return Err(AppError::malformed(
                    "object",
                    format!("expected a {} but got '{}'", expected, object),
                ));
            }
        }

        Ok(ObjectBase {
            id: str_field(record, "id")?,
            created_time: opt_timestamp(record, "created_time")?,
            last_edited_time: opt_timestamp(record, "last_edited_time")?,
            archived: flag(record, "archived"),
            created_by: opt_decode(record, "created_by")?,
            last_edited_by: opt_decode(record, "last_edited_by")?,
            parent: opt_decode(record, "parent")?,
        })
    }

    pub(crate) fn parent_to_wire(&self) -> Result<Value> {
        match &self.parent {
            Some(parent) => parent.to_wire(),
            None => Ok(Value::Null),
        }
    }
}
