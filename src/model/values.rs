// src/model/values.rs
//! Page property values: what a page holds for each column of its database.

use super::common::{Date, File, SelectOption};
use super::properties::NamedProperty;
use super::rich_text::{plain_text_of, RichText};
use super::user::User;
use super::wire::{
    self, array_field, field, flag, list_of, list_to_wire, opt_decode, optional, str_field,
    tag_of, FromWire, ToWire,
};
use crate::error::{AppError, Result};
use crate::types::{PropType, RollupFunction, WireTag};
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub id: String,
    pub name: String,
    pub value: ValueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<f64>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Status(Option<SelectOption>),
    Date(Option<Date>),
    People(Vec<User>),
    Files(Vec<File>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Formula(FormulaValue),
    Relation { ids: Vec<String>, has_more: bool },
    Rollup {
        function: RollupFunction,
        value: RollupValue,
    },
    CreatedTime(DateTime<FixedOffset>),
    CreatedBy(User),
    LastEditedTime(DateTime<FixedOffset>),
    LastEditedBy(User),
    Unsupported { type_tag: String },
}

/// The computed result of a formula, typed by the formula's output.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<Date>),
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<f64>),
    Date(Option<Date>),
    /// One value per related page, each decoded like a page property.
    Array(Vec<PropertyValue>),
    Unsupported,
}

fn opt_number(record: &Value, key: &str) -> Result<Option<f64>> {
    optional(record, key)
        .map(|number| {
            number
                .as_f64()
                .ok_or_else(|| AppError::malformed(key, "expected a number"))
        })
        .transpose()
}

fn decode_formula(payload: &Value) -> Result<FormulaValue> {
    Ok(match tag_of(payload) {
        "string" => FormulaValue::String(wire::opt_str(payload, "string")),
        "number" => FormulaValue::Number(opt_number(payload, "number")?),
        "boolean" => FormulaValue::Boolean(optional(payload, "boolean").and_then(Value::as_bool)),
        "date" => FormulaValue::Date(opt_decode(payload, "date")?),
        other => {
            log::debug!("Unsupported formula result type '{}'", other);
            FormulaValue::Unsupported
        }
    })
}

fn decode_rollup(payload: &Value) -> Result<ValueKind> {
    let function = wire::opt_str(payload, "function")
        .map(|raw| RollupFunction::from_wire(&raw))
        .unwrap_or(RollupFunction::Unsupported);
    let value = match tag_of(payload) {
        "number" => RollupValue::Number(opt_number(payload, "number")?),
        "date" => RollupValue::Date(opt_decode(payload, "date")?),
        "array" => RollupValue::Array(
            array_field(payload, "array")?
                .iter()
                .map(|item| {
                    let id = wire::opt_str(item, "id").unwrap_or_default();
                    decode_value(id, String::new(), item)
                })
                .collect::<Result<Vec<_>>>()?,
        ),
        other => {
            log::debug!("Unsupported rollup result type '{}'", other);
            RollupValue::Unsupported
        }
    };
    Ok(ValueKind::Rollup { function, value })
}

fn decode_relation(record: &Value) -> Result<ValueKind> {
    let ids = array_field(record, "relation")?
        .iter()
        .map(|related| str_field(related, "id"))
        .collect::<Result<Vec<_>>>()?;
    Ok(ValueKind::Relation {
        ids,
        has_more: flag(record, "has_more"),
    })
}

fn decode_value(id: String, name: String, record: &Value) -> Result<PropertyValue> {
    let tag = tag_of(record);
    let prop_type = PropType::from_wire(tag);
    let key = prop_type.as_str();

    let value = match prop_type {
        PropType::Title => ValueKind::Title(list_of(record, key)?),
        PropType::RichText => ValueKind::RichText(list_of(record, key)?),
        PropType::Number => ValueKind::Number(opt_number(record, key)?),
        PropType::Select => ValueKind::Select(opt_decode(record, key)?),
        PropType::MultiSelect => ValueKind::MultiSelect(list_of(record, key)?),
        PropType::Status => ValueKind::Status(opt_decode(record, key)?),
        PropType::Date => ValueKind::Date(opt_decode(record, key)?),
        PropType::People => ValueKind::People(list_of(record, key)?),
        PropType::Files => ValueKind::Files(list_of(record, key)?),
        PropType::Checkbox => ValueKind::Checkbox(
            field(record, key)?
                .as_bool()
                .ok_or_else(|| AppError::malformed(key, "expected a boolean"))?,
        ),
        PropType::Url => ValueKind::Url(wire::opt_str(record, key)),
        PropType::Email => ValueKind::Email(wire::opt_str(record, key)),
        PropType::PhoneNumber => ValueKind::PhoneNumber(wire::opt_str(record, key)),
        PropType::Formula => ValueKind::Formula(decode_formula(field(record, key)?)?),
        PropType::Relation => decode_relation(record)?,
        PropType::Rollup => decode_rollup(field(record, key)?)?,
        PropType::CreatedTime => ValueKind::CreatedTime(wire::timestamp(record, key)?),
        PropType::CreatedBy => ValueKind::CreatedBy(User::from_wire(field(record, key)?)?),
        PropType::LastEditedTime => ValueKind::LastEditedTime(wire::timestamp(record, key)?),
        PropType::LastEditedBy => ValueKind::LastEditedBy(User::from_wire(field(record, key)?)?),
        PropType::Unsupported => {
            log::warn!("Property value '{}' has unsupported type '{}'", name, tag);
            ValueKind::Unsupported {
                type_tag: tag.to_string(),
            }
        }
    };

    Ok(PropertyValue { id, name, value })
}

impl PropertyValue {
    pub fn new(name: impl Into<String>, value: ValueKind) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            value,
        }
    }

    /// Decodes one value entry; `name` is the key it was stored under.
    pub fn decode(name: &str, record: &Value) -> Result<Self> {
        decode_value(str_field(record, "id")?, name.to_string(), record)
    }

    pub fn prop_type(&self) -> PropType {
        match &self.value {
            ValueKind::Title(_) => PropType::Title,
            ValueKind::RichText(_) => PropType::RichText,
            ValueKind::Number(_) => PropType::Number,
            ValueKind::Select(_) => PropType::Select,
            ValueKind::MultiSelect(_) => PropType::MultiSelect,
            ValueKind::Status(_) => PropType::Status,
            ValueKind::Date(_) => PropType::Date,
            ValueKind::People(_) => PropType::People,
            ValueKind::Files(_) => PropType::Files,
            ValueKind::Checkbox(_) => PropType::Checkbox,
            ValueKind::Url(_) => PropType::Url,
            ValueKind::Email(_) => PropType::Email,
            ValueKind::PhoneNumber(_) => PropType::PhoneNumber,
            ValueKind::Formula(_) => PropType::Formula,
            ValueKind::Relation { .. } => PropType::Relation,
            ValueKind::Rollup { .. } => PropType::Rollup,
            ValueKind::CreatedTime(_) => PropType::CreatedTime,
            ValueKind::CreatedBy(_) => PropType::CreatedBy,
            ValueKind::LastEditedTime(_) => PropType::LastEditedTime,
            ValueKind::LastEditedBy(_) => PropType::LastEditedBy,
            ValueKind::Unsupported { .. } => PropType::Unsupported,
        }
    }

    /// Plain text of title and rich text values.
    pub fn plain_text(&self) -> Option<String> {
        match &self.value {
            ValueKind::Title(runs) | ValueKind::RichText(runs) => Some(plain_text_of(runs)),
            _ => None,
        }
    }

    fn payload(&self) -> Result<Value> {
        let computed = |what: &str| {
            Err(AppError::unsupported_by_api(format!(
                "updating {} property values",
                what
            )))
        };
        Ok(match &self.value {
            ValueKind::Title(runs) | ValueKind::RichText(runs) => list_to_wire(runs)?,
            ValueKind::Number(number) => json!(number),
            ValueKind::Select(option) | ValueKind::Status(option) => {
                wire::opt_to_wire(option.as_ref())?
            }
            ValueKind::MultiSelect(options) => list_to_wire(options)?,
            ValueKind::Date(date) => wire::opt_to_wire(date.as_ref())?,
            ValueKind::People(people) => list_to_wire(people)?,
            ValueKind::Files(files) => list_to_wire(files)?,
            ValueKind::Checkbox(checked) => json!(checked),
            ValueKind::Url(text) | ValueKind::Email(text) | ValueKind::PhoneNumber(text) => {
                json!(text)
            }
            ValueKind::Relation { ids, .. } => {
                Value::Array(ids.iter().map(|id| json!({ "id": id })).collect())
            }
            ValueKind::Formula(_)
            | ValueKind::Rollup { .. }
            | ValueKind::CreatedTime(_)
            | ValueKind::CreatedBy(_)
            | ValueKind::LastEditedTime(_)
            | ValueKind::LastEditedBy(_) => return computed(self.prop_type().as_str()),
            ValueKind::Unsupported { type_tag } => {
                return Err(AppError::unsupported_by_library(format!(
                    "serialization of '{}' property values",
                    type_tag
                )))
            }
        })
    }
}

impl ToWire for PropertyValue {
    fn to_wire(&self) -> Result<Value> {
        let mut record = serde_json::Map::new();
        record.insert(self.prop_type().as_str().to_string(), self.payload()?);
        Ok(Value::Object(record))
    }
}

impl NamedProperty for PropertyValue {
    type Kind = ValueKind;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind_mut(&mut self) -> &mut ValueKind {
        &mut self.value
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Unsupported;
    use crate::model::common::NotionDate;
    use crate::types::UserType;
    use pretty_assertions::assert_eq;

    fn decode(record: Value) -> PropertyValue {
        PropertyValue::decode("Prop", &record).unwrap()
    }

    #[test]
    fn test_nullable_values_decode_to_none() {
        assert_eq!(
            decode(json!({"id": "sXRE", "type": "number", "number": null})).value,
            ValueKind::Number(None)
        );
        assert_eq!(
            decode(json!({"id": "JvoV", "type": "select", "select": null})).value,
            ValueKind::Select(None)
        );
        assert_eq!(
            decode(json!({"id": "d", "type": "date", "date": null})).value,
            ValueKind::Date(None)
        );
        assert_eq!(
            decode(json!({"id": "QgOu", "type": "url", "url": null})).value,
            ValueKind::Url(None)
        );
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(
            decode(json!({"id": "sXRE", "type": "number", "number": 123})).value,
            ValueKind::Number(Some(123.0))
        );
        assert_eq!(
            decode(json!({"id": "_PxG", "type": "checkbox", "checkbox": false})).value,
            ValueKind::Checkbox(false)
        );
        assert_eq!(
            decode(json!({"id": "HZkg", "type": "phone_number", "phone_number": "1234567890"}))
                .value,
            ValueKind::PhoneNumber(Some("1234567890".to_string()))
        );
        let date = decode(json!({
            "id": "%5B%3BFA",
            "type": "date",
            "date": {"start": "2022-12-29T00:00:00.000+05:30", "end": null, "time_zone": null}
        }));
        assert!(matches!(
            date.value,
            ValueKind::Date(Some(Date { start: NotionDate::DateTime(_), end: None, .. }))
        ));
    }

    #[test]
    fn test_formula_results_are_typed() {
        let number = decode(json!({
            "id": "%40EE%7B",
            "type": "formula",
            "formula": {"type": "number", "number": 3}
        }));
        assert_eq!(number.value, ValueKind::Formula(FormulaValue::Number(Some(3.0))));

        let empty = decode(json!({
            "id": "%40EE%7B",
            "type": "formula",
            "formula": {"type": "string", "string": null}
        }));
        assert_eq!(empty.value, ValueKind::Formula(FormulaValue::String(None)));
    }

    #[test]
    fn test_relation_ids_and_has_more() {
        let relation = decode(json!({
            "id": "mr%3Bm",
            "type": "relation",
            "relation": [{"id": "page-id"}],
            "has_more": false
        }));
        assert_eq!(
            relation.value,
            ValueKind::Relation { ids: vec!["page-id".to_string()], has_more: false }
        );
    }

    #[test]
    fn test_rollup_number_and_array() {
        let rollup = decode(json!({
            "id": "omRg",
            "type": "rollup",
            "rollup": {"type": "number", "number": 0, "function": "checked"}
        }));
        assert_eq!(
            rollup.value,
            ValueKind::Rollup {
                function: RollupFunction::Checked,
                value: RollupValue::Number(Some(0.0)),
            }
        );

        let array = decode(json!({
            "id": "arr",
            "type": "rollup",
            "rollup": {
                "type": "array",
                "function": "show_original",
                "array": [
                    {"type": "title", "title": [{"type": "text", "text": {"content": "A"}, "plain_text": "A"}]},
                    {"type": "number", "number": 2}
                ]
            }
        }));
        let ValueKind::Rollup { value: RollupValue::Array(items), .. } = &array.value else {
            panic!("expected an array rollup");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].plain_text().as_deref(), Some("A"));
        assert_eq!(items[1].value, ValueKind::Number(Some(2.0)));
    }

    #[test]
    fn test_people_and_created_by() {
        let people = decode(json!({
            "id": "zk%5Ec",
            "type": "people",
            "people": [{
                "object": "user",
                "id": "user-id",
                "name": "guacs",
                "type": "person",
                "person": {"email": "guacs@awesome.com"}
            }]
        }));
        let ValueKind::People(users) = &people.value else {
            panic!("expected people");
        };
        assert_eq!(users[0].user_type(), UserType::Person);

        let created = decode(json!({
            "id": "I%40aJ",
            "type": "created_time",
            "created_time": "2022-12-23T08:50:00.000Z"
        }));
        assert_eq!(created.prop_type(), PropType::CreatedTime);
    }

    #[test]
    fn test_unknown_types_are_kept() {
        let value = decode(json!({"id": "u", "type": "unique_id", "unique_id": {"number": 3}}));
        assert_eq!(
            value.value,
            ValueKind::Unsupported { type_tag: "unique_id".to_string() }
        );
    }

    #[test]
    fn test_writable_values_serialize() {
        let title = PropertyValue::new("Name", ValueKind::Title(vec![RichText::text("Hello")]));
        let wire = title.to_wire().unwrap();
        assert_eq!(wire["title"][0]["text"]["content"], "Hello");

        let relation = PropertyValue::new(
            "Related",
            ValueKind::Relation { ids: vec!["p1".to_string()], has_more: false },
        );
        assert_eq!(relation.to_wire().unwrap(), json!({"relation": [{"id": "p1"}]}));

        let number = PropertyValue::new("Count", ValueKind::Number(None));
        assert_eq!(number.to_wire().unwrap(), json!({"number": null}));
    }

    #[test]
    fn test_computed_values_refuse_to_serialize() {
        let formula = PropertyValue::new("F", ValueKind::Formula(FormulaValue::Boolean(Some(true))));
        assert!(matches!(
            formula.to_wire(),
            Err(AppError::Unsupported(Unsupported::ByApi(_)))
        ));

        let unknown = PropertyValue::new("U", ValueKind::Unsupported { type_tag: "button".into() });
        assert!(matches!(
            unknown.to_wire(),
            Err(AppError::Unsupported(Unsupported::ByLibrary(_)))
        ));
    }
}
