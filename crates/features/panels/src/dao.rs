use crate::error::PanelError;
use atlas_database::{Database, DatabaseError, DatabaseErrorExt};
use atlas_domain::panel::{ContentKind, ContentPanel, ContentPanelDraft};
use std::str::FromStr;
use surrealdb::types::SurrealValue;

pub(crate) const TABLE: &str = "content_panel";

// `group` collides with the SurrealQL keyword, so the column is panel_group.
const SELECT_FIELDS: &str = "record::id(id) AS id, title, icon, panel_group, content, \
                             priority, width, kind";

/// Storage projection of one content panel.
#[derive(Debug, SurrealValue)]
pub(crate) struct PanelRow {
    id: i64,
    title: String,
    icon: String,
    panel_group: String,
    content: String,
    priority: i64,
    width: i64,
    kind: String,
}

impl TryFrom<PanelRow> for ContentPanel {
    type Error = PanelError;

    fn try_from(row: PanelRow) -> Result<Self, Self::Error> {
        let kind = ContentKind::from_str(&row.kind).map_err(|_| PanelError::Corrupt {
            id: row.id,
            detail: format!("unknown content kind '{}'", row.kind),
        })?;

        let draft = ContentPanelDraft {
            id: Some(row.id),
            title: Some(row.title),
            icon: Some(row.icon),
            group: Some(row.panel_group),
            content: Some(row.content),
            priority: Some(row.priority as i32),
            width: Some(row.width as i32),
            kind: Some(kind),
        };

        Self::try_from(draft)
            .map_err(|e| PanelError::Corrupt { id: row.id, detail: e.to_string() })
    }
}

/// Data access for the `content_panel` table.
#[derive(Debug, Clone)]
pub(crate) struct PanelDao {
    db: Database,
}

impl PanelDao {
    pub(crate) const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates or fully replaces the record with the given id.
    pub(crate) async fn upsert(&self, id: i64, panel: &ContentPanel) -> Result<(), DatabaseError> {
        self.db
            .query(
                "UPSERT type::thing('content_panel', $id) SET \
                 title = $title, icon = $icon, panel_group = $panel_group, \
                 content = $content, priority = $priority, width = $width, kind = $kind",
            )
            .bind(("id", id))
            .bind(("title", panel.title().to_owned()))
            .bind(("icon", panel.icon().to_owned()))
            .bind(("panel_group", panel.group().to_owned()))
            .bind(("content", panel.content().to_owned()))
            .bind(("priority", i64::from(panel.priority())))
            .bind(("width", i64::from(panel.width())))
            .bind(("kind", panel.kind().to_string()))
            .await
            .context("Saving content panel")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Saving content panel")?;

        Ok(())
    }

    pub(crate) async fn find_all(&self) -> Result<Vec<PanelRow>, DatabaseError> {
        self.db
            .query(format!("SELECT {SELECT_FIELDS} FROM content_panel ORDER BY priority ASC"))
            .await
            .context("Loading content panels")?
            .take::<Vec<PanelRow>>(0)
            .context("Parsing content panels")
    }

    pub(crate) async fn find_by_group(&self, group: &str) -> Result<Vec<PanelRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM content_panel \
                 WHERE panel_group = $panel_group ORDER BY priority ASC"
            ))
            .bind(("panel_group", group.to_owned()))
            .await
            .context("Loading content panels by group")?
            .take::<Vec<PanelRow>>(0)
            .context("Parsing content panels by group")
    }
}
