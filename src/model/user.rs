use super::wire::{opt_str, optional, str_field, tag_of, FromWire, ToWire};
use crate::error::Result;
use crate::types::{BotOwner, UserType, WireTag};
use serde_json::{json, Value};

/// A workspace member or integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub kind: UserKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKind {
    Person {
        email: Option<String>,
    },
    /// `workspace_name` is only set when the owner is a workspace.
    Bot {
        owner: Option<BotOwner>,
        workspace_name: Option<String>,
    },
}

impl User {
    pub fn user_type(&self) -> UserType {
        match self.kind {
            UserKind::Person { .. } => UserType::Person,
            UserKind::Bot { .. } => UserType::Bot,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match &self.kind {
            UserKind::Person { email } => email.as_deref(),
            UserKind::Bot { .. } => None,
        }
    }
}

impl FromWire for User {
    /// Records without a recognised `type` are read as bots. Partial user
    /// references (just `object` and `id`) land here too.
    fn from_wire(record: &Value) -> Result<Self> {
        let tag = tag_of(record);
        let kind = match UserType::from_wire(tag) {
            UserType::Person => UserKind::Person {
                email: optional(record, "person").and_then(|person| opt_str(person, "email")),
            },
            user_type => {
                if user_type == UserType::Unsupported && !tag.is_empty() {
                    log::warn!("Unknown user type '{}', reading it as a bot", tag);
                }
                let bot = optional(record, "bot");
                UserKind::Bot {
                    owner: bot
                        .and_then(|bot| optional(bot, "owner"))
                        .and_then(|owner| opt_str(owner, "type"))
                        .map(|owner| BotOwner::from_wire(&owner)),
                    workspace_name: bot.and_then(|bot| opt_str(bot, "workspace_name")),
                }
            }
        };

        Ok(User {
            id: str_field(record, "id")?,
            name: opt_str(record, "name"),
            avatar_url: opt_str(record, "avatar_url"),
            kind,
        })
    }
}

impl ToWire for User {
    /// Users are referenced by id when written.
    fn to_wire(&self) -> Result<Value> {
        Ok(json!({"object": "user", "id": self.id}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_person_reads_nested_email() {
        let user = User::from_wire(&json!({
            "object": "user",
            "id": "user-id",
            "type": "person",
            "name": "Ada",
            "avatar_url": null,
            "person": {"email": "ada@example.com"}
        }))
        .unwrap();
        assert_eq!(user.user_type(), UserType::Person);
        assert_eq!(user.email(), Some("ada@example.com"));
        assert_eq!(user.avatar_url, None);

        let no_email = User::from_wire(&json!({"id": "u2", "type": "person", "person": {}})).unwrap();
        assert_eq!(no_email.email(), None);
    }

    #[test]
    fn test_bot_reads_owner_and_workspace() {
        let user = User::from_wire(&json!({
            "object": "user",
            "id": "bot-id",
            "type": "bot",
            "name": "Acme Workspace",
            "bot": {"owner": {"type": "workspace", "workspace": true}, "workspace_name": "Acme Workspace"}
        }))
        .unwrap();
        assert_eq!(
            user.kind,
            UserKind::Bot {
                owner: Some(BotOwner::Workspace),
                workspace_name: Some("Acme Workspace".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_or_unknown_type_reads_as_bot() {
        let reference = User::from_wire(&json!({"object": "user", "id": "u3"})).unwrap();
        assert_eq!(reference.user_type(), UserType::Bot);
        assert_eq!(
            reference.kind,
            UserKind::Bot { owner: None, workspace_name: None }
        );

        let unknown = User::from_wire(&json!({"id": "u4", "type": "agent"})).unwrap();
        assert_eq!(unknown.user_type(), UserType::Bot);
    }

    #[test]
    fn test_user_without_id_is_malformed() {
        assert!(User::from_wire(&json!({"type": "person"})).is_err());
    }
}
