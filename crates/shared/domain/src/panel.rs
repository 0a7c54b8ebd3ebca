use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Default display width, in units of a 12-unit grid.
pub const DEFAULT_PANEL_WIDTH: i32 = 12;

/// Renderable kind of a panel's content.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Html,
    Markdown,
    Plain,
}

/// A titled, grouped static content panel.
///
/// Instances only exist in a fully validated state: construction goes
/// through [`ContentPanelDraft`] (deserialization included, via
/// `try_from`), defaults are applied exactly once, and the fields are
/// read-only afterwards. Updates replace the value rather than mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "ContentPanelDraft")]
pub struct ContentPanel {
    id: Option<i64>,
    title: String,
    icon: String,
    group: String,
    content: String,
    priority: i32,
    width: i32,
    kind: ContentKind,
}

impl ContentPanel {
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Returns a copy of this panel carrying the given persisted id.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// All-fields-optional construction input for [`ContentPanel`].
///
/// Missing mandatory fields surface as [`ValidationError::MissingField`];
/// `width` and `kind` fall back to their documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentPanelDraft {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub kind: Option<ContentKind>,
}

impl TryFrom<ContentPanelDraft> for ContentPanel {
    type Error = ValidationError;

    fn try_from(draft: ContentPanelDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            id: draft.id,
            title: draft.title.ok_or(ValidationError::MissingField("title"))?,
            icon: draft.icon.ok_or(ValidationError::MissingField("icon"))?,
            group: draft.group.ok_or(ValidationError::MissingField("group"))?,
            content: draft.content.ok_or(ValidationError::MissingField("content"))?,
            priority: draft.priority.ok_or(ValidationError::MissingField("priority"))?,
            width: draft.width.unwrap_or(DEFAULT_PANEL_WIDTH),
            kind: draft.kind.unwrap_or(ContentKind::Html),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> ContentPanelDraft {
        ContentPanelDraft {
            id: None,
            title: Some("Welcome".to_owned()),
            icon: Some("home".to_owned()),
            group: Some("HOME".to_owned()),
            content: Some("<p>hello</p>".to_owned()),
            priority: Some(1),
            width: None,
            kind: None,
        }
    }

    #[test]
    fn accessors_return_supplied_values() {
        let draft = ContentPanelDraft {
            width: Some(6),
            kind: Some(ContentKind::Markdown),
            ..full_draft()
        };
        let panel = ContentPanel::try_from(draft).unwrap();

        assert_eq!(panel.title(), "Welcome");
        assert_eq!(panel.icon(), "home");
        assert_eq!(panel.group(), "HOME");
        assert_eq!(panel.content(), "<p>hello</p>");
        assert_eq!(panel.priority(), 1);
        assert_eq!(panel.width(), 6);
        assert_eq!(panel.kind(), ContentKind::Markdown);
    }

    #[test]
    fn omitted_optional_fields_take_documented_defaults() {
        let panel = ContentPanel::try_from(full_draft()).unwrap();
        assert_eq!(panel.width(), DEFAULT_PANEL_WIDTH);
        assert_eq!(panel.kind(), ContentKind::Html);
    }

    #[test]
    fn construction_fails_for_each_missing_required_field() {
        for (field, draft) in [
            ("title", ContentPanelDraft { title: None, ..full_draft() }),
            ("icon", ContentPanelDraft { icon: None, ..full_draft() }),
            ("group", ContentPanelDraft { group: None, ..full_draft() }),
            ("content", ContentPanelDraft { content: None, ..full_draft() }),
            ("priority", ContentPanelDraft { priority: None, ..full_draft() }),
        ] {
            let err = ContentPanel::try_from(draft).unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
        }
    }

    #[test]
    fn deserialization_routes_through_validated_construction() {
        let raw = r#"{"title":"Welcome","icon":"home","group":"HOME","content":"x","priority":2}"#;
        let panel: ContentPanel = serde_json::from_str(raw).unwrap();
        assert_eq!(panel.width(), DEFAULT_PANEL_WIDTH);
        assert_eq!(panel.kind(), ContentKind::Html);

        let missing = r#"{"icon":"home","group":"HOME","content":"x","priority":2}"#;
        assert!(serde_json::from_str::<ContentPanel>(missing).is_err());
    }

    #[test]
    fn serialization_round_trip_preserves_values() {
        let panel = ContentPanel::try_from(full_draft()).unwrap().with_id(9);
        let json = serde_json::to_string(&panel).unwrap();
        let back: ContentPanel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, panel);
    }
}
