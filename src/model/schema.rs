// src/model/schema.rs
//! Database schema properties: the column definitions of a database.
//!
//! Each wire entry carries `id` and `type` fields and a payload keyed by the
//! type tag; the entry's name is the key it is stored under in the parent
//! map. Decoding picks a constructor from a static tag table. Known types
//! with broken payloads are hard errors, unknown types become
//! [`SchemaKind::Unsupported`].

use super::common::{SelectOption, StatusGroup};
use super::properties::NamedProperty;
use super::wire::{field, list_of, list_to_wire, str_field, ToWire};
use crate::error::{AppError, Result};
use crate::types::{NumberFormat, PropType, RelationType, RollupFunction, WireTag};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaProperty {
    /// Empty until the API has assigned one.
    pub id: String,
    pub name: String,
    pub kind: SchemaKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    Title,
    RichText,
    Number {
        format: NumberFormat,
    },
    Select {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    Status {
        options: Vec<SelectOption>,
        groups: Vec<StatusGroup>,
    },
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula {
        expression: String,
    },
    Relation {
        database_id: String,
        relation: RelationKind,
    },
    Rollup {
        relation_property_name: String,
        relation_property_id: String,
        rollup_property_name: String,
        rollup_property_id: String,
        function: RollupFunction,
    },
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    /// A type this library does not model. Keeps the raw tag.
    Unsupported {
        type_tag: String,
    },
}

/// The two ways a relation links databases. Synced fields only exist for
/// dual relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationKind {
    SingleProperty,
    DualProperty {
        synced_property_name: String,
        synced_property_id: String,
    },
}

impl RelationKind {
    pub fn relation_type(&self) -> RelationType {
        match self {
            RelationKind::SingleProperty => RelationType::SingleProperty,
            RelationKind::DualProperty { .. } => RelationType::DualProperty,
        }
    }
}

type SchemaDecoder = fn(&Value) -> Result<SchemaKind>;

/// Tag to constructor. Each constructor receives the payload under the tag.
static SCHEMA_DECODERS: Lazy<HashMap<PropType, SchemaDecoder>> = Lazy::new(|| {
    let mut table: HashMap<PropType, SchemaDecoder> = HashMap::new();
    table.insert(PropType::Title, |_| Ok(SchemaKind::Title));
    table.insert(PropType::RichText, |_| Ok(SchemaKind::RichText));
    table.insert(PropType::Number, decode_number);
    table.insert(PropType::Select, decode_select);
    table.insert(PropType::MultiSelect, decode_multi_select);
    table.insert(PropType::Status, decode_status);
    table.insert(PropType::Date, |_| Ok(SchemaKind::Date));
    table.insert(PropType::People, |_| Ok(SchemaKind::People));
    table.insert(PropType::Files, |_| Ok(SchemaKind::Files));
    table.insert(PropType::Checkbox, |_| Ok(SchemaKind::Checkbox));
    table.insert(PropType::Url, |_| Ok(SchemaKind::Url));
    table.insert(PropType::Email, |_| Ok(SchemaKind::Email));
    table.insert(PropType::PhoneNumber, |_| Ok(SchemaKind::PhoneNumber));
    table.insert(PropType::Formula, decode_formula);
    table.insert(PropType::Relation, decode_relation);
    table.insert(PropType::Rollup, decode_rollup);
    table.insert(PropType::CreatedTime, |_| Ok(SchemaKind::CreatedTime));
    table.insert(PropType::CreatedBy, |_| Ok(SchemaKind::CreatedBy));
    table.insert(PropType::LastEditedTime, |_| Ok(SchemaKind::LastEditedTime));
    table.insert(PropType::LastEditedBy, |_| Ok(SchemaKind::LastEditedBy));
    table
});

fn decode_number(payload: &Value) -> Result<SchemaKind> {
    Ok(SchemaKind::Number {
        format: NumberFormat::from_wire(&str_field(payload, "format")?),
    })
}

fn decode_select(payload: &Value) -> Result<SchemaKind> {
    Ok(SchemaKind::Select {
        options: list_of(payload, "options")?,
    })
}

fn decode_multi_select(payload: &Value) -> Result<SchemaKind> {
    Ok(SchemaKind::MultiSelect {
        options: list_of(payload, "options")?,
    })
}

fn decode_status(payload: &Value) -> Result<SchemaKind> {
    Ok(SchemaKind::Status {
        options: list_of(payload, "options")?,
        groups: list_of(payload, "groups")?,
    })
}

fn decode_formula(payload: &Value) -> Result<SchemaKind> {
    Ok(SchemaKind::Formula {
        expression: str_field(payload, "expression")?,
    })
}

/// The subtype fields sit one level deeper, under the subtype's own tag.
/// They are lifted to the top of the relation here.
fn decode_relation(payload: &Value) -> Result<SchemaKind> {
    let relation_tag = str_field(payload, "type")?;
    let relation = match RelationType::from_wire(&relation_tag) {
        RelationType::DualProperty => {
            let details = field(payload, RelationType::DualProperty.as_str())?;
            RelationKind::DualProperty {
                synced_property_name: str_field(details, "synced_property_name")?,
                synced_property_id: str_field(details, "synced_property_id")?,
            }
        }
        RelationType::SingleProperty => RelationKind::SingleProperty,
        RelationType::Unsupported => {
            return Err(AppError::malformed(
                "relation.type",
                format!("unknown relation type '{}'", relation_tag),
            ))
        }
    };
    Ok(SchemaKind::Relation {
        database_id: str_field(payload, "database_id")?,
        relation,
    })
}

fn decode_rollup(payload: &Value) -> Result<SchemaKind> {
    Ok(SchemaKind::Rollup {
        relation_property_name: str_field(payload, "relation_property_name")?,
        relation_property_id: str_field(payload, "relation_property_id")?,
        rollup_property_name: str_field(payload, "rollup_property_name")?,
        rollup_property_id: str_field(payload, "rollup_property_id")?,
        function: RollupFunction::from_wire(&str_field(payload, "function")?),
    })
}

impl SchemaProperty {
    /// A property not yet known to the API.
    pub fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kind,
        }
    }

    /// Decodes one schema entry; `name` is the key it was stored under.
    pub fn decode(name: &str, record: &Value) -> Result<Self> {
        let id = str_field(record, "id")?;
        let tag = str_field(record, "type")?;
        let prop_type = PropType::from_wire(&tag);

        let kind = match SCHEMA_DECODERS.get(&prop_type) {
            Some(decode) => {
                let payload = field(record, prop_type.as_str())?;
                decode(payload).map_err(|e| {
                    log::error!("Failed to decode property '{}' of type '{}': {}", name, tag, e);
                    e
                })?
            }
            None => {
                log::warn!("Property '{}' has unsupported type '{}'", name, tag);
                SchemaKind::Unsupported { type_tag: tag }
            }
        };

        Ok(SchemaProperty {
            id,
            name: name.to_string(),
            kind,
        })
    }

    pub fn prop_type(&self) -> PropType {
        match &self.kind {
            SchemaKind::Title => PropType::Title,
            SchemaKind::RichText => PropType::RichText,
            SchemaKind::Number { .. } => PropType::Number,
            SchemaKind::Select { .. } => PropType::Select,
            SchemaKind::MultiSelect { .. } => PropType::MultiSelect,
            SchemaKind::Status { .. } => PropType::Status,
            SchemaKind::Date => PropType::Date,
            SchemaKind::People => PropType::People,
            SchemaKind::Files => PropType::Files,
            SchemaKind::Checkbox => PropType::Checkbox,
            SchemaKind::Url => PropType::Url,
            SchemaKind::Email => PropType::Email,
            SchemaKind::PhoneNumber => PropType::PhoneNumber,
            SchemaKind::Formula { .. } => PropType::Formula,
            SchemaKind::Relation { .. } => PropType::Relation,
            SchemaKind::Rollup { .. } => PropType::Rollup,
            SchemaKind::CreatedTime => PropType::CreatedTime,
            SchemaKind::CreatedBy => PropType::CreatedBy,
            SchemaKind::LastEditedTime => PropType::LastEditedTime,
            SchemaKind::LastEditedBy => PropType::LastEditedBy,
            SchemaKind::Unsupported { .. } => PropType::Unsupported,
        }
    }

    fn payload(&self) -> Result<Value> {
        Ok(match &self.kind {
            SchemaKind::Number { format } => json!({ "format": format }),
            SchemaKind::Select { options } | SchemaKind::MultiSelect { options } => {
                json!({ "options": options_to_wire(options)? })
            }
            SchemaKind::Status { .. } => {
                return Err(AppError::unsupported_by_api("updating status property options"))
            }
            SchemaKind::Formula { expression } => json!({ "expression": expression }),
            SchemaKind::Relation {
                database_id,
                relation,
            } => {
                let subtype = relation.relation_type();
                let details = match relation {
                    RelationKind::SingleProperty => json!({}),
                    RelationKind::DualProperty {
                        synced_property_name,
                        synced_property_id,
                    } => json!({
                        "synced_property_name": synced_property_name,
                        "synced_property_id": synced_property_id,
                    }),
                };
                let mut payload = Map::new();
                payload.insert("database_id".to_string(), json!(database_id));
                payload.insert("type".to_string(), json!(subtype));
                payload.insert(subtype.as_str().to_string(), details);
                Value::Object(payload)
            }
            SchemaKind::Rollup {
                relation_property_name,
                relation_property_id,
                rollup_property_name,
                rollup_property_id,
                function,
            } => json!({
                "relation_property_name": relation_property_name,
                "relation_property_id": relation_property_id,
                "rollup_property_name": rollup_property_name,
                "rollup_property_id": rollup_property_id,
                "function": function,
            }),
            SchemaKind::Unsupported { type_tag } => {
                return Err(AppError::unsupported_by_library(format!(
                    "serialization of '{}' properties",
                    type_tag
                )))
            }
            _ => json!({}),
        })
    }
}

/// Option names identify options on update, so they must be unique.
fn options_to_wire(options: &[SelectOption]) -> Result<Value> {
    let mut seen = HashSet::new();
    if let Some(duplicate) = options.iter().find(|option| !seen.insert(option.name.as_str())) {
        return Err(AppError::DuplicateOption(duplicate.name.clone()));
    }
    list_to_wire(options)
}

impl ToWire for SchemaProperty {
    fn to_wire(&self) -> Result<Value> {
        let mut record = Map::new();
        record.insert("name".to_string(), json!(self.name));
        record.insert(self.prop_type().as_str().to_string(), self.payload()?);
        Ok(Value::Object(record))
    }
}

impl NamedProperty for SchemaProperty {
    type Kind = SchemaKind;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind_mut(&mut self) -> &mut SchemaKind {
        &mut self.kind
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
