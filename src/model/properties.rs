// src/model/properties.rs
//! A property collection addressable by id or by name.
//!
//! Names are required and unique. Ids are unique when present; properties
//! created locally have no id until the API assigns one, so they are only
//! reachable by name. Ids and names share one key space: a new property is
//! rejected if its id or name matches any existing id or name.

use super::wire::ToWire;
use crate::error::{AppError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A property that can live in a [`Properties`] collection.
pub trait NamedProperty: ToWire {
    /// The part of the property that can change in place.
    type Kind;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn kind_mut(&mut self) -> &mut Self::Kind;
    fn set_name(&mut self, name: String);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Properties<P> {
    /// Insertion-ordered, keyed by name.
    by_name: IndexMap<String, P>,
    /// Id to name, for properties that have an id.
    names_by_id: HashMap<String, String>,
}

impl<P> Default for Properties<P> {
    fn default() -> Self {
        Self {
            by_name: IndexMap::new(),
            names_by_id: HashMap::new(),
        }
    }
}

impl<P: NamedProperty> Properties<P> {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_taken(&self, key: &str) -> bool {
        self.by_name.contains_key(key) || self.names_by_id.contains_key(key)
    }

    fn resolve(&self, key: &str) -> Option<&str> {
        if let Some((name, _)) = self.by_name.get_key_value(key) {
            return Some(name.as_str());
        }
        self.names_by_id.get(key).map(String::as_str)
    }

    /// Adds a property. Nothing changes if the add fails.
    pub fn add(&mut self, property: P) -> Result<()> {
        let name = property.name();
        if name.is_empty() {
            return Err(AppError::PropertyNameRequired);
        }
        if self.is_taken(name) {
            return Err(AppError::PropertyExists(name.to_string()));
        }
        let id = property.id();
        if !id.is_empty() && self.is_taken(id) {
            return Err(AppError::PropertyExists(id.to_string()));
        }

        let name = name.to_string();
        if !id.is_empty() {
            self.names_by_id.insert(id.to_string(), name.clone());
        }
        self.by_name.insert(name, property);
        Ok(())
    }

    /// Looks a property up by id or name.
    pub fn get(&self, key: &str) -> Result<&P> {
        self.resolve(key)
            .and_then(|name| self.by_name.get(name))
            .ok_or_else(|| AppError::PropertyNotFound(key.to_string()))
    }

    /// The editable part of a property, looked up by id or name. Ids and
    /// names stay out of reach so the indexes cannot drift; use
    /// [`Properties::rename`] for names.
    pub fn kind_mut(&mut self, key: &str) -> Result<&mut P::Kind> {
        let name = self
            .resolve(key)
            .map(str::to_string)
            .ok_or_else(|| AppError::PropertyNotFound(key.to_string()))?;
        self.by_name
            .get_mut(&name)
            .map(NamedProperty::kind_mut)
            .ok_or_else(|| AppError::PropertyNotFound(key.to_string()))
    }

    /// Renames a property in place, keeping its position and id. Nothing
    /// changes if the new name is empty or already taken.
    pub fn rename(&mut self, key: &str, new_name: &str) -> Result<()> {
        if new_name.is_empty() {
            return Err(AppError::PropertyNameRequired);
        }
        let old_name = self
            .resolve(key)
            .map(str::to_string)
            .ok_or_else(|| AppError::PropertyNotFound(key.to_string()))?;
        if old_name == new_name {
            return Ok(());
        }
        let taken_by_other_id = self
            .names_by_id
            .get(new_name)
            .is_some_and(|owner| *owner != old_name);
        if self.by_name.contains_key(new_name) || taken_by_other_id {
            return Err(AppError::PropertyExists(new_name.to_string()));
        }

        let (index, _, mut property) = self
            .by_name
            .shift_remove_full(&old_name)
            .ok_or_else(|| AppError::PropertyNotFound(key.to_string()))?;
        property.set_name(new_name.to_string());
        if !property.id().is_empty() {
            self.names_by_id
                .insert(property.id().to_string(), new_name.to_string());
        }
        self.by_name.shift_insert(index, new_name.to_string(), property);
        log::debug!("Renamed property '{}' to '{}'", old_name, new_name);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    /// Removes a property by id or name, keeping the order of the rest.
    pub fn pop(&mut self, key: &str) -> Result<P> {
        let name = self
            .resolve(key)
            .map(str::to_string)
            .ok_or_else(|| AppError::PropertyNotFound(key.to_string()))?;
        let property = self
            .by_name
            .shift_remove(&name)
            .ok_or_else(|| AppError::PropertyNotFound(key.to_string()))?;
        if !property.id().is_empty() {
            self.names_by_id.remove(property.id());
        }
        Ok(property)
    }

    /// Removes exactly this property. A different property that happens to
    /// share its id or name is not removed.
    pub fn pop_instance(&mut self, property: &P) -> Result<P>
    where
        P: PartialEq,
    {
        match self.by_name.get(property.name()) {
            Some(stored) if stored == property => self.pop(property.name()),
            _ => Err(AppError::PropertyNotFound(property.name().to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.by_name.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Ids of the properties that have one.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.iter().map(NamedProperty::id).filter(|id| !id.is_empty())
    }

    /// The wire map of every serializable property, keyed by id (or by name
    /// when there is no id yet). Properties the library or API cannot write
    /// are left out, which leaves them untouched remotely.
    pub fn to_wire(&self) -> Result<Map<String, Value>> {
        let mut wire = Map::new();
        for property in self.iter() {
            let key = if property.id().is_empty() {
                property.name()
            } else {
                property.id()
            };
            match property.to_wire() {
                Ok(value) => {
                    wire.insert(key.to_string(), value);
                }
                Err(AppError::Unsupported(reason)) => {
                    log::debug!(
                        "Leaving property '{}' out of the update: {}",
                        property.name(),
                        reason
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(wire)
    }
}

impl<'a, P: NamedProperty> IntoIterator for &'a Properties<P> {
    type Item = &'a P;
    type IntoIter = indexmap::map::Values<'a, String, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_name.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::{SchemaKind, SchemaProperty};
    use pretty_assertions::assert_eq;

    fn prop(id: &str, name: &str) -> SchemaProperty {
        SchemaProperty {
            id: id.to_string(),
            name: name.to_string(),
            kind: SchemaKind::RichText,
        }
    }

    fn collection() -> Properties<SchemaProperty> {
        let mut props = Properties::new();
        props.add(prop("a1", "Notes")).unwrap();
        props.add(prop("b2", "Price")).unwrap();
        props
    }

    #[test]
    fn test_lookup_by_id_or_name() {
        let props = collection();
        assert_eq!(props.get("a1").unwrap(), props.get("Notes").unwrap());
        assert!(std::ptr::eq(props.get("b2").unwrap(), props.get("Price").unwrap()));
        assert!(props.contains("Price"));
        assert!(!props.contains("Missing"));
        assert!(matches!(props.get("Missing"), Err(AppError::PropertyNotFound(_))));
    }

    #[test]
    fn test_add_rejects_duplicates_without_partial_insert() {
        let mut props = collection();
        assert!(matches!(
            props.add(prop("a1", "Other")),
            Err(AppError::PropertyExists(_))
        ));
        assert!(matches!(
            props.add(prop("c3", "Notes")),
            Err(AppError::PropertyExists(_))
        ));
        assert!(matches!(
            props.add(prop("Price", "Fresh")),
            Err(AppError::PropertyExists(_))
        ));
        assert_eq!(props.len(), 2);
        assert!(!props.contains("c3"));
        assert!(!props.contains("Fresh"));
    }

    #[test]
    fn test_add_requires_a_name() {
        let mut props = collection();
        assert!(matches!(
            props.add(prop("z9", "")),
            Err(AppError::PropertyNameRequired)
        ));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_new_properties_without_ids() {
        let mut props = collection();
        props.add(SchemaProperty::new("Draft", SchemaKind::Checkbox)).unwrap();
        props.add(SchemaProperty::new("Another", SchemaKind::Date)).unwrap();
        assert_eq!(props.len(), 4);
        assert_eq!(props.ids().collect::<Vec<_>>(), vec!["a1", "b2"]);
        assert!(props.get("Draft").is_ok());
    }

    #[test]
    fn test_pop_by_id_name_or_instance() {
        let mut props = collection();
        assert_eq!(props.pop("a1").unwrap().name, "Notes");
        assert!(!props.contains("Notes"));

        let mut props = collection();
        assert_eq!(props.pop("Notes").unwrap().id, "a1");
        assert!(!props.contains("a1"));

        let mut props = collection();
        let price = props.get("Price").unwrap().clone();
        assert_eq!(props.pop_instance(&price).unwrap(), price);
        assert_eq!(props.len(), 1);

        let mut props = collection();
        let impostor = SchemaProperty {
            kind: SchemaKind::Number { format: Default::default() },
            ..prop("b2", "Price")
        };
        assert!(matches!(
            props.pop_instance(&impostor),
            Err(AppError::PropertyNotFound(_))
        ));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_kind_mut_edits_in_place() {
        let mut props = collection();
        *props.kind_mut("b2").unwrap() = SchemaKind::Checkbox;
        assert_eq!(props.get("Price").unwrap().kind, SchemaKind::Checkbox);
        assert!(matches!(props.kind_mut("nope"), Err(AppError::PropertyNotFound(_))));
    }

    #[test]
    fn test_rename_keeps_both_indexes_in_step() {
        let mut props = collection();
        props.rename("a1", "Comments").unwrap();

        assert_eq!(props.names().collect::<Vec<_>>(), vec!["Comments", "Price"]);
        assert_eq!(props.get("a1").unwrap().name, "Comments");
        assert!(std::ptr::eq(props.get("a1").unwrap(), props.get("Comments").unwrap()));
        assert!(!props.contains("Notes"));

        let before = props.clone();
        assert!(matches!(props.rename("a1", "Price"), Err(AppError::PropertyExists(_))));
        assert!(matches!(props.rename("a1", "b2"), Err(AppError::PropertyExists(_))));
        assert!(matches!(props.rename("a1", ""), Err(AppError::PropertyNameRequired)));
        assert_eq!(props, before);

        props.rename("Comments", "a1").unwrap();
        assert_eq!(props.get("a1").unwrap().id, "a1");
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut props = collection();
        props.add(prop("c3", "Tags")).unwrap();
        props.pop("Notes").unwrap();
        assert_eq!(props.names().collect::<Vec<_>>(), vec!["Price", "Tags"]);
    }

    #[test]
    fn test_to_wire_skips_unwritable_properties() {
        let mut props = collection();
        props
            .add(SchemaProperty {
                id: "btn".to_string(),
                name: "Button".to_string(),
                kind: SchemaKind::Unsupported { type_tag: "button".to_string() },
            })
            .unwrap();
        props.add(SchemaProperty::new("Done", SchemaKind::Checkbox)).unwrap();

        let wire = props.to_wire().unwrap();
        assert_eq!(wire.len(), 3);
        assert!(wire.contains_key("a1"));
        assert!(wire.contains_key("Done"));
        assert!(!wire.contains_key("btn"));
    }
}
