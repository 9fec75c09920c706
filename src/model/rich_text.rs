// src/model/rich_text.rs
//! Rich text runs and their plain-text projection.
//!
//! A rich text value is an ordered list of runs. Each run carries the text
//! as rendered, optional link target and styling, plus a variant payload
//! selected by the run's `type` tag. Decoding never fails on an unknown tag;
//! the run keeps its shared fields and becomes [`RichTextKind::Unsupported`].

use super::common::{Annotations, Date, Link};
use super::wire::{object, opt_str, optional, tag_of, FromWire, ToWire};
use crate::error::{AppError, Result};
use crate::types::{MentionType, RichTextType, WireTag};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    pub plain_text: String,
    pub href: Option<String>,
    pub annotations: Annotations,
    pub kind: RichTextKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichTextKind {
    Text { content: String, link: Option<Link> },
    Mention(Mention),
    Equation { expression: String },
    Unsupported,
}

/// Payload of a mention run. Which fields are set depends on `mention_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub mention_type: MentionType,
    pub id: Option<String>,
    pub date: Option<Date>,
    pub url: Option<String>,
}

impl Mention {
    fn bare(mention_type: MentionType) -> Self {
        Self {
            mention_type,
            id: None,
            date: None,
            url: None,
        }
    }
}

impl RichText {
    /// An unstyled text run.
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            plain_text: content.clone(),
            href: None,
            annotations: Annotations::default(),
            kind: RichTextKind::Text {
                content,
                link: None,
            },
        }
    }

    /// A text run linking to `url`.
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let mut run = Self::text(content);
        run.href = Some(url.clone());
        if let RichTextKind::Text { link, .. } = &mut run.kind {
            *link = Some(Link { url });
        }
        run
    }

    pub fn rich_text_type(&self) -> RichTextType {
        match self.kind {
            RichTextKind::Text { .. } => RichTextType::Text,
            RichTextKind::Mention(_) => RichTextType::Mention,
            RichTextKind::Equation { .. } => RichTextType::Equation,
            RichTextKind::Unsupported => RichTextType::Unsupported,
        }
    }
}

fn decode_mention(record: &Value) -> Mention {
    let Some(payload) = optional(record, "mention") else {
        return Mention::bare(MentionType::Unsupported);
    };
    let mention_type = MentionType::from_wire(tag_of(payload));
    let mut mention = Mention::bare(mention_type);

    match mention_type {
        MentionType::Date => {
            mention.date = optional(payload, "date").and_then(|date| match Date::from_wire(date) {
                Ok(date) => Some(date),
                Err(e) => {
                    log::warn!("Dropping unreadable date mention: {}", e);
                    None
                }
            });
        }
        MentionType::LinkPreview => {
            mention.url = optional(payload, "link_preview")
                .and_then(|preview| opt_str(preview, "url"))
                .or_else(|| opt_str(payload, "url"));
        }
        MentionType::Page | MentionType::Database => {
            mention.id = optional(payload, mention_type.as_str())
                .and_then(|target| opt_str(target, "id"));
        }
        _ => {}
    }
    mention
}

impl FromWire for RichText {
    fn from_wire(record: &Value) -> Result<Self> {
        object(record, "rich text")?;
        let plain_text = opt_str(record, "plain_text").unwrap_or_default();
        let tag = tag_of(record);

        let kind = match RichTextType::from_wire(tag) {
            RichTextType::Text => {
                let payload = optional(record, "text");
                RichTextKind::Text {
                    content: payload
                        .and_then(|text| opt_str(text, "content"))
                        .unwrap_or_else(|| plain_text.clone()),
                    link: payload
                        .and_then(|text| optional(text, "link"))
                        .and_then(|link| opt_str(link, "url"))
                        .map(|url| Link { url }),
                }
            }
            RichTextType::Mention => RichTextKind::Mention(decode_mention(record)),
            RichTextType::Equation => RichTextKind::Equation {
                expression: optional(record, "equation")
                    .and_then(|equation| opt_str(equation, "expression"))
                    .unwrap_or_default(),
            },
            RichTextType::Unsupported => {
                log::debug!("Unsupported rich text type '{}'", tag);
                RichTextKind::Unsupported
            }
        };

        Ok(RichText {
            plain_text,
            href: opt_str(record, "href"),
            annotations: optional(record, "annotations")
                .map(Annotations::from_record)
                .unwrap_or_default(),
            kind,
        })
    }
}

impl ToWire for RichText {
    fn to_wire(&self) -> Result<Value> {
        let RichTextKind::Text { content, link } = &self.kind else {
            return Err(AppError::unsupported_by_library(format!(
                "serialization of '{}' rich text",
                self.rich_text_type()
            )));
        };
        Ok(json!({
            "type": "text",
            "text": {
                "content": content,
                "link": link,
            },
            "annotations": self.annotations,
            "plain_text": self.plain_text,
            "href": self.href,
        }))
    }
}

/// The plain text of a rich text list, runs joined with a single space.
pub fn plain_text_of(runs: &[RichText]) -> String {
    runs.iter()
        .map(|run| run.plain_text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces the whole list with one unstyled text run.
pub fn set_plain_text(runs: &mut Vec<RichText>, text: &str) {
    *runs = vec![RichText::text(text)];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use pretty_assertions::assert_eq;

    fn text_record() -> Value {
        json!({
            "type": "text",
            "text": {"content": "Notion", "link": {"url": "https://notion.so"}},
            "annotations": {
                "bold": true, "italic": false, "strikethrough": false,
                "underline": true, "code": false, "color": "red"
            },
            "plain_text": "Notion",
            "href": "https://notion.so"
        })
    }

    #[test]
    fn test_text_run_decodes_link_and_styling() {
        let run = RichText::from_wire(&text_record()).unwrap();
        assert_eq!(run.plain_text, "Notion");
        assert_eq!(run.href.as_deref(), Some("https://notion.so"));
        assert!(run.annotations.bold && run.annotations.underline);
        assert_eq!(run.annotations.color, Color::Red);
        assert_eq!(
            run.kind,
            RichTextKind::Text {
                content: "Notion".to_string(),
                link: Some(Link { url: "https://notion.so".to_string() }),
            }
        );
    }

    #[test]
    fn test_text_survives_a_wire_round_trip() {
        let mut run = RichText::link("docs", "https://example.com/docs");
        run.annotations.italic = true;
        run.annotations.color = Color::BlueBackground;
        let back = RichText::from_wire(&run.to_wire().unwrap()).unwrap();
        assert_eq!(back, run);

        let plain = RichText::text("plain");
        assert_eq!(RichText::from_wire(&plain.to_wire().unwrap()).unwrap(), plain);
    }

    #[test]
    fn test_mentions_extract_by_nested_type() {
        let page = RichText::from_wire(&json!({
            "type": "mention",
            "mention": {"type": "page", "page": {"id": "page-id"}},
            "plain_text": "Some page",
            "href": null
        }))
        .unwrap();
        let RichTextKind::Mention(mention) = page.kind else {
            panic!("expected a mention");
        };
        assert_eq!(mention.mention_type, MentionType::Page);
        assert_eq!(mention.id.as_deref(), Some("page-id"));

        let date = RichText::from_wire(&json!({
            "type": "mention",
            "mention": {"type": "date", "date": {"start": "2022-10-24", "end": null, "time_zone": null}},
            "plain_text": "2022-10-24"
        }))
        .unwrap();
        assert!(matches!(
            date.kind,
            RichTextKind::Mention(Mention { mention_type: MentionType::Date, date: Some(_), .. })
        ));

        let preview = RichText::from_wire(&json!({
            "type": "mention",
            "mention": {"type": "link_preview", "link_preview": {"url": "https://github.com"}},
            "plain_text": "https://github.com"
        }))
        .unwrap();
        assert!(matches!(
            preview.kind,
            RichTextKind::Mention(Mention { url: Some(ref url), .. }) if url == "https://github.com"
        ));

        let user = RichText::from_wire(&json!({
            "type": "mention",
            "mention": {"type": "user", "user": {"object": "user", "id": "u1"}},
            "plain_text": "@Ada"
        }))
        .unwrap();
        assert_eq!(
            user.kind,
            RichTextKind::Mention(Mention::bare(MentionType::User))
        );
    }

    #[test]
    fn test_unknown_types_keep_shared_fields() {
        let run = RichText::from_wire(&json!({
            "type": "hologram",
            "hologram": {},
            "plain_text": "???",
            "href": null
        }))
        .unwrap();
        assert_eq!(run.kind, RichTextKind::Unsupported);
        assert_eq!(run.plain_text, "???");
        assert_eq!(run.annotations, Annotations::default());
    }

    #[test]
    fn test_only_text_serializes() {
        let equation = RichText::from_wire(&json!({
            "type": "equation",
            "equation": {"expression": "e=mc^2"},
            "plain_text": "e=mc^2"
        }))
        .unwrap();
        assert_eq!(
            equation.kind,
            RichTextKind::Equation { expression: "e=mc^2".to_string() }
        );
        let err = equation.to_wire().unwrap_err();
        assert!(matches!(
            err,
            AppError::Unsupported(crate::error::Unsupported::ByLibrary(_))
        ));
    }

    #[test]
    fn test_plain_text_projection() {
        let mut runs = vec![RichText::text("Hello"), RichText::text("world")];
        assert_eq!(plain_text_of(&runs), "Hello world");
        set_plain_text(&mut runs, "Replaced");
        assert_eq!(runs, vec![RichText::text("Replaced")]);
        assert_eq!(plain_text_of(&[]), "");
    }
}
