//! Value objects shared by rich text, properties and domain objects.

use super::wire::{self, null_as_default, opt_str, optional, str_field, tag_of, FromWire, ToWire};
use crate::error::{AppError, Result};
use crate::types::{Color, FileType, WireTag};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Styling applied to a run of rich text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    /// Never fails: a record that cannot be read yields plain annotations.
    pub fn from_record(record: &Value) -> Self {
        serde_json::from_value(record.clone()).unwrap_or_else(|e| {
            log::warn!("Unreadable annotations, using defaults: {}", e);
            Annotations::default()
        })
    }
}

const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A calendar date or a timestamp; Notion uses both in date fields.
///
/// Timestamps without an offset come paired with a `time_zone` on the
/// enclosing [`Date`] and are kept as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotionDate {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl NotionDate {
    pub fn parse(raw: &str) -> Result<Self> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(NotionDate::DateTime(timestamp));
        }
        if let Ok(local) = NaiveDateTime::parse_from_str(raw, NAIVE_DATETIME_FORMAT) {
            return Ok(NotionDate::Naive(local));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(NotionDate::Date)
            .map_err(|_| AppError::malformed("date", format!("unrecognised date '{}'", raw)))
    }

    /// The calendar day, dropping any time of day.
    pub fn date_naive(&self) -> NaiveDate {
        match self {
            NotionDate::Date(date) => *date,
            NotionDate::DateTime(timestamp) => timestamp.date_naive(),
            NotionDate::Naive(local) => local.date(),
        }
    }
}

impl fmt::Display for NotionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotionDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            NotionDate::DateTime(timestamp) => {
                write!(f, "{}", timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            NotionDate::Naive(local) => write!(f, "{}", local.format("%Y-%m-%dT%H:%M:%S%.3f")),
        }
    }
}

/// A date or date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    pub start: NotionDate,
    pub end: Option<NotionDate>,
    pub time_zone: Option<String>,
}

impl Date {
    pub fn new(start: NotionDate) -> Self {
        Self {
            start,
            end: None,
            time_zone: None,
        }
    }
}

impl FromWire for Date {
    fn from_wire(record: &Value) -> Result<Self> {
        let start = NotionDate::parse(&str_field(record, "start")?)?;
        let end = opt_str(record, "end")
            .map(|raw| NotionDate::parse(&raw))
            .transpose()?;
        Ok(Date {
            start,
            end,
            time_zone: opt_str(record, "time_zone"),
        })
    }
}

impl ToWire for Date {
    fn to_wire(&self) -> Result<Value> {
        Ok(json!({
            "start": self.start.to_string(),
            "end": self.end.map(|end| end.to_string()),
            "time_zone": self.time_zone,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    pub emoji: String,
}

impl ToWire for Emoji {
    fn to_wire(&self) -> Result<Value> {
        Ok(json!({"type": "emoji", "emoji": self.emoji}))
    }
}

/// Where a file lives. Only Notion-hosted files expire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileHosting {
    Hosted { expiry_time: DateTime<FixedOffset> },
    External,
    /// A file kind this library does not model; keeps the raw tag.
    Unsupported { type_tag: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: Option<String>,
    pub url: String,
    pub hosting: FileHosting,
}

impl File {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            name: None,
            url: url.into(),
            hosting: FileHosting::External,
        }
    }

    pub fn file_type(&self) -> FileType {
        match self.hosting {
            FileHosting::Hosted { .. } => FileType::File,
            FileHosting::External => FileType::External,
            FileHosting::Unsupported { .. } => FileType::Unsupported,
        }
    }
}

impl FromWire for File {
    fn from_wire(record: &Value) -> Result<Self> {
        let tag = tag_of(record);
        let file_type = FileType::from_wire(tag);
        if file_type == FileType::Unsupported {
            log::warn!("Unsupported file type '{}'", tag);
            return Ok(File {
                name: opt_str(record, "name"),
                url: optional(record, tag)
                    .and_then(|details| opt_str(details, "url"))
                    .unwrap_or_default(),
                hosting: FileHosting::Unsupported {
                    type_tag: tag.to_string(),
                },
            });
        }
        let details = wire::field(record, file_type.as_str())?;
        let hosting = match file_type {
            FileType::File => FileHosting::Hosted {
                expiry_time: wire::timestamp(details, "expiry_time")?,
            },
            _ => FileHosting::External,
        };
        Ok(File {
            name: opt_str(record, "name"),
            url: str_field(details, "url")?,
            hosting,
        })
    }
}

impl ToWire for File {
    fn to_wire(&self) -> Result<Value> {
        if let FileHosting::Unsupported { type_tag } = &self.hosting {
            return Err(AppError::unsupported_by_library(format!("'{}' files", type_tag)));
        }
        let tag = self.file_type().as_str();
        let mut details = Map::new();
        details.insert("url".to_string(), json!(self.url));
        if let FileHosting::Hosted { expiry_time } = &self.hosting {
            details.insert(
                "expiry_time".to_string(),
                json!(expiry_time.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }

        let mut record = Map::new();
        record.insert("type".to_string(), json!(tag));
        record.insert(tag.to_string(), Value::Object(details));
        if let Some(name) = &self.name {
            record.insert("name".to_string(), json!(name));
        }
        Ok(Value::Object(record))
    }
}

/// Page and database icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Emoji(Emoji),
    File(File),
    /// An icon kind such as `custom_emoji` that this library does not model.
    Unsupported(String),
}

impl FromWire for Icon {
    fn from_wire(record: &Value) -> Result<Self> {
        let tag = tag_of(record);
        if tag == "emoji" {
            return wire::deserialize(record, "icon").map(Icon::Emoji);
        }
        match FileType::from_wire(tag) {
            FileType::Unsupported => {
                log::warn!("Unsupported icon type '{}'", tag);
                Ok(Icon::Unsupported(tag.to_string()))
            }
            _ => File::from_wire(record).map(Icon::File),
        }
    }
}

impl ToWire for Icon {
    fn to_wire(&self) -> Result<Value> {
        match self {
            Icon::Emoji(emoji) => emoji.to_wire(),
            Icon::File(file) => file.to_wire(),
            Icon::Unsupported(tag) => {
                Err(AppError::unsupported_by_library(format!("'{}' icons", tag)))
            }
        }
    }
}

/// An option of a select, multi-select or status property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: Color,
}

impl SelectOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: Color::Default,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl FromWire for SelectOption {
    fn from_wire(record: &Value) -> Result<Self> {
        wire::deserialize(record, "option")
    }
}

impl ToWire for SelectOption {
    fn to_wire(&self) -> Result<Value> {
        let mut record = Map::new();
        if let Some(id) = &self.id {
            record.insert("id".to_string(), json!(id));
        }
        record.insert("name".to_string(), json!(self.name));
        record.insert("color".to_string(), json!(self.color));
        Ok(Value::Object(record))
    }
}

/// A named group of status options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: Color,
    #[serde(default, deserialize_with = "null_as_default")]
    pub option_ids: Vec<String>,
}

impl FromWire for StatusGroup {
    fn from_wire(record: &Value) -> Result<Self> {
        wire::deserialize(record, "status group")
    }
}

/// What an object is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Page(String),
    Database(String),
    Block(String),
    Workspace,
    /// A parent kind this library does not model; keeps the raw tag.
    Unsupported(String),
}

impl FromWire for Parent {
    fn from_wire(record: &Value) -> Result<Self> {
        let tag = tag_of(record);
        Ok(match tag {
            "page_id" => Parent::Page(str_field(record, tag)?),
            "database_id" => Parent::Database(str_field(record, tag)?),
            "block_id" => Parent::Block(str_field(record, tag)?),
            "workspace" => Parent::Workspace,
            other => {
                log::debug!("Unrecognised parent type '{}'", other);
                Parent::Unsupported(other.to_string())
            }
        })
    }
}

impl ToWire for Parent {
    fn to_wire(&self) -> Result<Value> {
        match self {
            Parent::Page(id) => Ok(json!({"type": "page_id", "page_id": id})),
            Parent::Database(id) => Ok(json!({"type": "database_id", "database_id": id})),
            Parent::Block(id) => Ok(json!({"type": "block_id", "block_id": id})),
            Parent::Workspace => Ok(json!({"type": "workspace", "workspace": true})),
            Parent::Unsupported(tag) => {
                Err(AppError::unsupported_by_library(format!("'{}' parents", tag)))
            }
        }
    }
}
