use crate::dao::{ApplicationDao, TABLE};
use crate::error::ApplicationError;
use atlas_database::Database;
use atlas_domain::application::{
    AppRegistrationRequest, AppRegistrationResponse, Application, AssetCodeRelationshipKind,
};
use atlas_domain::events::{ApplicationRegistered, ApplicationUpdated};
use atlas_domain::tally::Tally;
use atlas_event_bus::EventBus;
use atlas_kernel::safe_nanoid;
use std::collections::HashMap;
use tracing::{debug, info};

/// Application registry service: registration, whole-record replacement,
/// auxiliary collection replacement, and the read-side queries.
///
/// Each call runs to completion on the calling task; consistency of
/// concurrent updates to one record is delegated to the store.
#[derive(Debug, Clone)]
pub struct ApplicationService {
    db: Database,
    dao: ApplicationDao,
    events: EventBus,
}

impl ApplicationService {
    #[must_use]
    pub fn new(db: Database, events: EventBus) -> Self {
        let dao = ApplicationDao::new(db.clone());
        Self { db, dao, events }
    }

    /// Registers a new application and returns the assigned id.
    ///
    /// A missing asset code is filled with a generated one before the
    /// write. No audit entry is produced here; the endpoint layer writes
    /// the registration entry once the id exists.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] if the insert fails; nothing
    /// is persisted and no event is published in that case.
    pub async fn register(
        &self,
        request: AppRegistrationRequest,
    ) -> Result<AppRegistrationResponse, ApplicationError> {
        let request = AppRegistrationRequest {
            asset_code: request.asset_code.or_else(|| Some(safe_nanoid!())),
            ..request
        };

        let app = Application {
            id: None,
            name: request.name.clone(),
            description: request.description.clone().unwrap_or_default(),
            asset_code: request.asset_code.clone(),
            parent_asset_code: request.parent_asset_code.clone(),
            org_unit_id: request.org_unit_id,
            kind: request.kind,
            lifecycle_phase: request.lifecycle_phase,
        };

        let id = self.db.next_id(TABLE).await?;
        self.dao.insert(id, &app).await?;

        info!(id, name = %request.name, "Application registered");
        self.events.publish(ApplicationRegistered { id })?;

        Ok(AppRegistrationResponse { id, request })
    }

    /// Replaces the stored entity state with `app`.
    ///
    /// # Errors
    /// Returns [`ApplicationError::MissingId`] if `app.id` is `None`, and
    /// [`ApplicationError::Database`] if the write fails.
    pub async fn update(&self, app: &Application) -> Result<(), ApplicationError> {
        let id = app.id.ok_or(ApplicationError::MissingId)?;
        self.dao.update(id, app).await?;

        debug!(id, "Application state replaced");
        self.events.publish(ApplicationUpdated { id })?;
        Ok(())
    }

    /// Wholesale replacement of the tag set for one application.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] if the write fails.
    pub async fn update_tags(&self, id: i64, tags: &[String]) -> Result<(), ApplicationError> {
        self.dao.replace_tags(id, tags).await?;
        Ok(())
    }

    /// Wholesale replacement of the alias set for one application.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] if the write fails.
    pub async fn update_aliases(
        &self,
        id: i64,
        aliases: &[String],
    ) -> Result<(), ApplicationError> {
        self.dao.replace_aliases(id, aliases).await?;
        Ok(())
    }

    /// Free-text search over name, description and asset code, ordered by name.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] on read failure.
    pub async fn search(&self, query: &str) -> Result<Vec<Application>, ApplicationError> {
        collect(self.dao.search(query).await?)
    }

    /// Single application, or `None` when absent.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] on read failure.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Application>, ApplicationError> {
        self.dao.get_by_id(id).await?.map(Application::try_from).transpose()
    }

    /// Applications matching any of `ids`, ordered by name.
    ///
    /// An empty input returns an empty list without touching the store.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] on read failure.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Application>, ApplicationError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        collect(self.dao.find_by_ids(ids.to_vec()).await?)
    }

    /// Applications assigned to any of the given organisational units.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] on read failure.
    pub async fn find_by_org_units(
        &self,
        org_unit_ids: &[i64],
    ) -> Result<Vec<Application>, ApplicationError> {
        if org_unit_ids.is_empty() {
            return Ok(Vec::new());
        }
        collect(self.dao.find_by_org_units(org_unit_ids.to_vec()).await?)
    }

    /// Application counts keyed by organisational unit.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] on read failure.
    pub async fn count_by_org_unit(&self) -> Result<Vec<Tally>, ApplicationError> {
        Ok(self.dao.tally_by_org_unit().await?.into_iter().map(Tally::from).collect())
    }

    /// Every distinct tag across all applications, sorted.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] on read failure.
    pub async fn find_all_tags(&self) -> Result<Vec<String>, ApplicationError> {
        let mut tags: Vec<String> =
            self.dao.load_all_tag_sets().await?.into_iter().flatten().collect();
        tags.sort_unstable();
        tags.dedup();
        Ok(tags)
    }

    /// Applications carrying the given tag, ordered by name.
    ///
    /// # Errors
    /// Returns [`ApplicationError::Database`] on read failure.
    pub async fn find_by_tag(&self, tag: &str) -> Result<Vec<Application>, ApplicationError> {
        collect(self.dao.find_by_tag(tag).await?)
    }

    /// Applications related to `id` through asset-code links, keyed by
    /// relationship kind. Kinds with no matches are omitted.
    ///
    /// # Errors
    /// Returns [`ApplicationError::NotFound`] if `id` does not exist, and
    /// [`ApplicationError::Database`] on read failure.
    pub async fn find_related(
        &self,
        id: i64,
    ) -> Result<HashMap<AssetCodeRelationshipKind, Vec<Application>>, ApplicationError> {
        let app = self.get_by_id(id).await?.ok_or(ApplicationError::NotFound(id))?;

        let mut related = HashMap::new();

        if let Some(parent_code) = &app.parent_asset_code {
            let parents = collect(self.dao.find_by_asset_code(parent_code, id).await?)?;
            if !parents.is_empty() {
                related.insert(AssetCodeRelationshipKind::Parent, parents);
            }

            let siblings = collect(self.dao.find_by_parent_asset_code(parent_code, id).await?)?;
            if !siblings.is_empty() {
                related.insert(AssetCodeRelationshipKind::SharesParent, siblings);
            }
        }

        if let Some(own_code) = &app.asset_code {
            let children = collect(self.dao.find_by_parent_asset_code(own_code, id).await?)?;
            if !children.is_empty() {
                related.insert(AssetCodeRelationshipKind::Child, children);
            }
        }

        Ok(related)
    }
}

fn collect(
    rows: Vec<crate::dao::ApplicationRow>,
) -> Result<Vec<Application>, ApplicationError> {
    rows.into_iter().map(Application::try_from).collect()
}
