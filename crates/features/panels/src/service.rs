use crate::dao::{PanelDao, TABLE};
use crate::error::PanelError;
use atlas_database::Database;
use atlas_domain::panel::{ContentPanel, ContentPanelDraft};
use tracing::debug;

/// Content-panel service: validated construction plus create-or-replace
/// persistence and grouped lookups.
#[derive(Debug, Clone)]
pub struct PanelService {
    db: Database,
    dao: PanelDao,
}

impl PanelService {
    #[must_use]
    pub fn new(db: Database) -> Self {
        let dao = PanelDao::new(db.clone());
        Self { db, dao }
    }

    /// Validates the draft and persists the resulting panel, creating it
    /// when the draft carries no id and replacing the stored value otherwise.
    ///
    /// # Errors
    /// Returns [`PanelError::Validation`] if a mandatory field is missing,
    /// and [`PanelError::Database`] if the write fails.
    pub async fn save(&self, draft: ContentPanelDraft) -> Result<ContentPanel, PanelError> {
        let panel = ContentPanel::try_from(draft)?;

        let id = match panel.id() {
            Some(id) => id,
            None => self.db.next_id(TABLE).await?,
        };
        let panel = panel.with_id(id);

        self.dao.upsert(id, &panel).await?;
        debug!(id, group = panel.group(), "Content panel saved");

        Ok(panel)
    }

    /// All panels ordered by priority.
    ///
    /// # Errors
    /// Returns [`PanelError::Database`] on read failure.
    pub async fn find_all(&self) -> Result<Vec<ContentPanel>, PanelError> {
        self.dao.find_all().await?.into_iter().map(ContentPanel::try_from).collect()
    }

    /// Panels belonging to one group, ordered by priority.
    ///
    /// # Errors
    /// Returns [`PanelError::Database`] on read failure.
    pub async fn find_by_group(&self, group: &str) -> Result<Vec<ContentPanel>, PanelError> {
        self.dao.find_by_group(group).await?.into_iter().map(ContentPanel::try_from).collect()
    }
}
