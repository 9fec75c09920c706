// src/model/database.rs
//! Notion databases: a title, a description and a schema of properties.

use super::common::{File, Icon};
use super::object::ObjectBase;
use super::properties::Properties;
use super::rich_text::{plain_text_of, set_plain_text, RichText};
use super::schema::SchemaProperty;
use super::wire::{self, flag, object, opt_decode, opt_list_of, opt_str, optional, FromWire, ToWire};
use crate::api::{NotionClient, PageStream};
use crate::error::Result;
use crate::types::{ObjectType, PropType, WireTag};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub base: ObjectBase,
    pub rich_title: Vec<RichText>,
    pub rich_description: Vec<RichText>,
    pub icon: Option<Icon>,
    pub cover: Option<File>,
    pub is_inline: bool,
    pub url: Option<String>,
    /// The schema, without the title column.
    pub properties: Properties<SchemaProperty>,
    /// Property ids present when the database was decoded.
    original_ids: HashSet<String>,
}

impl Database {
    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Database
    }

    pub fn title(&self) -> String {
        plain_text_of(&self.rich_title)
    }

    pub fn set_title(&mut self, title: &str) {
        set_plain_text(&mut self.rich_title, title);
    }

    pub fn description(&self) -> String {
        plain_text_of(&self.rich_description)
    }

    pub fn set_description(&mut self, description: &str) {
        set_plain_text(&mut self.rich_description, description);
    }

    /// Ids of properties removed from the schema since it was decoded.
    pub fn deleted_property_ids(&self) -> Vec<String> {
        let current: HashSet<&str> = self.properties.ids().collect();
        let mut deleted: Vec<String> = self
            .original_ids
            .iter()
            .filter(|id| !current.contains(id.as_str()))
            .cloned()
            .collect();
        deleted.sort();
        deleted
    }

    /// Pushes local changes to Notion and returns the database as the API
    /// now reports it.
    pub fn update(&self, client: &NotionClient) -> Result<Database> {
        client.update_database(self)
    }

    /// Lazily walks the pages of this database. `max_pages` of 0 means all.
    pub fn pages<'c>(&self, client: &'c NotionClient, max_pages: usize) -> PageStream<'c> {
        client.pages(&self.base.id, max_pages)
    }
}

impl FromWire for Database {
    fn from_wire(record: &Value) -> Result<Self> {
        let base = ObjectBase::decode(record, ObjectType::Database)?;

        let mut properties = Properties::new();
        if let Some(schema) = optional(record, "properties") {
            for (name, entry) in object(schema, "properties")? {
                if PropType::from_wire(wire::tag_of(entry)) == PropType::Title {
                    continue;
                }
                properties.add(SchemaProperty::decode(name, entry)?)?;
            }
        }
        let original_ids = properties.ids().map(str::to_string).collect();
        log::debug!(
            "Decoded database {} with {} properties",
            base.id,
            properties.len()
        );

        Ok(Database {
            base,
            rich_title: opt_list_of(record, "title")?,
            rich_description: opt_list_of(record, "description")?,
            icon: opt_decode(record, "icon")?,
            cover: opt_decode(record, "cover")?,
            is_inline: flag(record, "is_inline"),
            url: opt_str(record, "url"),
            properties,
            original_ids,
        })
    }
}

impl ToWire for Database {
    fn to_wire(&self) -> Result<Value> {
        let mut properties = self.properties.to_wire()?;
        properties.insert("title".to_string(), json!({ "title": {} }));

        let mut record = Map::new();
        record.insert("is_inline".to_string(), json!(self.is_inline));
        record.insert("archived".to_string(), json!(self.base.archived));
        record.insert("properties".to_string(), Value::Object(properties));
        record.insert("parent".to_string(), self.base.parent_to_wire()?);
        wire::insert_writable(&mut record, "icon", self.icon.as_ref())?;
        wire::insert_writable(&mut record, "cover", self.cover.as_ref())?;
        record.insert("title".to_string(), wire::list_to_wire(&self.rich_title)?);
        record.insert(
            "description".to_string(),
            wire::list_to_wire(&self.rich_description)?,
        );
        Ok(Value::Object(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::common::Emoji;
    use crate::model::schema::SchemaKind;
    use pretty_assertions::assert_eq;

    fn sample() -> Value {
        json!({
            "object": "database",
            "id": "db-id",
            "created_time": "2022-10-24T22:54:00.000Z",
            "last_edited_time": "2022-10-25T07:02:00.000Z",
            "title": [{"type": "text", "text": {"content": "Tasks", "link": null}, "plain_text": "Tasks", "href": null}],
            "description": [],
            "icon": {"type": "emoji", "emoji": "✅"},
            "cover": null,
            "parent": {"type": "page_id", "page_id": "parent-page"},
            "url": "https://www.notion.so/db-id",
            "archived": false,
            "is_inline": false,
            "properties": {
                "Name": {"id": "title", "name": "Name", "type": "title", "title": {}},
                "Done": {"id": "chk", "name": "Done", "type": "checkbox", "checkbox": {}},
                "Notes": {"id": "txt", "name": "Notes", "type": "rich_text", "rich_text": {}}
            }
        })
    }

    #[test]
    fn test_title_column_is_not_a_property() {
        let db = Database::from_wire(&sample()).unwrap();
        assert_eq!(db.title(), "Tasks");
        assert_eq!(db.properties.len(), 2);
        assert!(!db.properties.contains("title"));
        assert_eq!(db.properties.get("chk").unwrap().name, "Done");
        assert_eq!(db.icon, Some(Icon::Emoji(Emoji { emoji: "✅".to_string() })));
    }

    #[test]
    fn test_title_and_description_setters() {
        let mut db = Database::from_wire(&sample()).unwrap();
        db.set_title("Renamed");
        db.set_description("All the things");
        assert_eq!(db.title(), "Renamed");
        assert_eq!(db.rich_title, vec![RichText::text("Renamed")]);
        assert_eq!(db.description(), "All the things");
    }

    #[test]
    fn test_deleted_properties_are_tracked() {
        let mut db = Database::from_wire(&sample()).unwrap();
        assert!(db.deleted_property_ids().is_empty());
        db.properties.pop("Done").unwrap();
        db.properties
            .add(SchemaProperty::new("Due", SchemaKind::Date))
            .unwrap();
        assert_eq!(db.deleted_property_ids(), vec!["chk"]);
    }

    #[test]
    fn test_wire_shape_for_updates() {
        let db = Database::from_wire(&sample()).unwrap();
        let wire = db.to_wire().unwrap();
        assert_eq!(wire["properties"]["title"], json!({"title": {}}));
        assert_eq!(wire["properties"]["chk"], json!({"name": "Done", "checkbox": {}}));
        assert_eq!(wire["parent"], json!({"type": "page_id", "page_id": "parent-page"}));
        assert_eq!(wire["icon"], json!({"type": "emoji", "emoji": "✅"}));
        assert_eq!(wire["cover"], Value::Null);
        assert_eq!(wire["title"][0]["text"]["content"], "Tasks");
        assert_eq!(wire["is_inline"], json!(false));
    }
}
