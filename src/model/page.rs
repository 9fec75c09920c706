use super::common::{File, Icon};
use super::object::ObjectBase;
use super::properties::Properties;
use super::rich_text::{plain_text_of, set_plain_text, RichText};
use super::values::PropertyValue;
use super::wire::{self, object, opt_decode, opt_str, optional, FromWire, ToWire};
use crate::error::Result;
use crate::types::ObjectType;
use serde_json::{json, Map, Value};

/// Id Notion gives the title property of every page.
const TITLE_PROPERTY_ID: &str = "title";

/// A Notion page. The title lives among the property values on the wire;
/// here it is pulled out into `rich_title`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub base: ObjectBase,
    pub rich_title: Vec<RichText>,
    /// Name of the title property, when the page had one.
    pub title_property: Option<String>,
    pub icon: Option<Icon>,
    pub cover: Option<File>,
    pub url: Option<String>,
    pub properties: Properties<PropertyValue>,
}

impl Page {
    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Page
    }

    pub fn title(&self) -> String {
        plain_text_of(&self.rich_title)
    }

    pub fn set_title(&mut self, title: &str) {
        set_plain_text(&mut self.rich_title, title);
    }
}

impl FromWire for Page {
    fn from_wire(record: &Value) -> Result<Self> {
        let base = ObjectBase::decode(record, ObjectType::Page)?;

        let mut rich_title = Vec::new();
        let mut title_property = None;
        let mut properties = Properties::new();
        if let Some(values) = optional(record, "properties") {
            for (name, entry) in object(values, "properties")? {
                if opt_str(entry, "id").as_deref() == Some(TITLE_PROPERTY_ID) {
                    rich_title = wire::list_of(entry, "title")?;
                    title_property = Some(name.clone());
                    continue;
                }
                properties.add(PropertyValue::decode(name, entry)?)?;
            }
        }

        Ok(Page {
            base,
            rich_title,
            title_property,
            icon: opt_decode(record, "icon")?,
            cover: opt_decode(record, "cover")?,
            url: opt_str(record, "url"),
            properties,
        })
    }
}

impl ToWire for Page {
    fn to_wire(&self) -> Result<Value> {
        let mut properties = self.properties.to_wire()?;
        properties.insert(
            TITLE_PROPERTY_ID.to_string(),
            json!({ "title": wire::list_to_wire(&self.rich_title)? }),
        );

        let mut record = Map::new();
        record.insert("archived".to_string(), json!(self.base.archived));
        record.insert("properties".to_string(), Value::Object(properties));
        record.insert("parent".to_string(), self.base.parent_to_wire()?);
        wire::insert_writable(&mut record, "icon", self.icon.as_ref())?;
        wire::insert_writable(&mut record, "cover", self.cover.as_ref())?;
        Ok(Value::Object(record))
    }
}
