//! The typed object model: value types, properties and Notion objects.
//!
//! Decoding goes through [`FromWire`] over `serde_json::Value` so each type
//! can apply its own policy for missing and unknown data. Encoding goes
//! through [`ToWire`] and fails with an `Unsupported` error for anything the
//! library or the API cannot write.

mod block;
pub mod common;
mod comment;
mod database;
mod object;
mod page;
pub mod properties;
pub mod rich_text;
pub mod schema;
mod user;
pub mod values;
pub mod wire;

pub use block::Block;
pub use comment::Comment;
pub use common::*;
pub use database::Database;
pub use object::ObjectBase;
pub use page::Page;
pub use properties::{NamedProperty, Properties};
pub use rich_text::{plain_text_of, set_plain_text, Mention, RichText, RichTextKind};
pub use schema::{RelationKind, SchemaKind, SchemaProperty};
pub use user::{User, UserKind};
pub use values::{FormulaValue, PropertyValue, RollupValue, ValueKind};
pub use wire::{FromWire, ToWire};
