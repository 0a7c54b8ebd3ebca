use crate::error::ApplicationError;
use atlas_database::{Database, DatabaseError, DatabaseErrorExt};
use atlas_domain::application::{Application, ApplicationKind, LifecyclePhase};
use atlas_domain::tally::Tally;
use std::str::FromStr;
use surrealdb::types::SurrealValue;

pub(crate) const TABLE: &str = "application";

const SELECT_FIELDS: &str = "record::id(id) AS id, name, description, asset_code, \
                             parent_asset_code, org_unit_id, kind, lifecycle_phase";

/// Storage projection of one application record.
#[derive(Debug, SurrealValue)]
pub(crate) struct ApplicationRow {
    id: i64,
    name: String,
    description: String,
    asset_code: Option<String>,
    parent_asset_code: Option<String>,
    org_unit_id: i64,
    kind: String,
    lifecycle_phase: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = ApplicationError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let kind = ApplicationKind::from_str(&row.kind).map_err(|_| ApplicationError::Corrupt {
            id: row.id,
            detail: format!("unknown application kind '{}'", row.kind),
        })?;
        let lifecycle_phase = LifecyclePhase::from_str(&row.lifecycle_phase).map_err(|_| {
            ApplicationError::Corrupt {
                id: row.id,
                detail: format!("unknown lifecycle phase '{}'", row.lifecycle_phase),
            }
        })?;

        Ok(Self {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            asset_code: row.asset_code,
            parent_asset_code: row.parent_asset_code,
            org_unit_id: row.org_unit_id,
            kind,
            lifecycle_phase,
        })
    }
}

#[derive(Debug, SurrealValue)]
pub(crate) struct OrgUnitTallyRow {
    pub org_unit_id: i64,
    pub count: i64,
}

impl From<OrgUnitTallyRow> for Tally {
    fn from(row: OrgUnitTallyRow) -> Self {
        Self::new(row.org_unit_id.to_string(), row.count)
    }
}

/// Data access for the `application` table.
///
/// Entity fields and the auxiliary tag/alias collections are written by
/// separate statements: replacing the entity state leaves the collections
/// untouched, and the collection updates are wholesale replacements.
#[derive(Debug, Clone)]
pub(crate) struct ApplicationDao {
    db: Database,
}

impl ApplicationDao {
    pub(crate) const fn new(db: Database) -> Self {
        Self { db }
    }

    pub(crate) async fn insert(&self, id: i64, app: &Application) -> Result<(), DatabaseError> {
        self.db
            .query(
                "CREATE type::thing('application', $id) SET \
                 name = $name, description = $description, asset_code = $asset_code, \
                 parent_asset_code = $parent_asset_code, org_unit_id = $org_unit_id, \
                 kind = $kind, lifecycle_phase = $lifecycle_phase, \
                 tags = [], aliases = []",
            )
            .bind(("id", id))
            .bind(("name", app.name.clone()))
            .bind(("description", app.description.clone()))
            .bind(("asset_code", app.asset_code.clone()))
            .bind(("parent_asset_code", app.parent_asset_code.clone()))
            .bind(("org_unit_id", app.org_unit_id))
            .bind(("kind", app.kind.to_string()))
            .bind(("lifecycle_phase", app.lifecycle_phase.to_string()))
            .await
            .context("Inserting application")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Inserting application")?;

        Ok(())
    }

    /// Replaces the entity fields of an existing record; a missing record
    /// is a no-op, never an implicit create.
    pub(crate) async fn update(&self, id: i64, app: &Application) -> Result<(), DatabaseError> {
        self.db
            .query(
                "UPDATE type::thing('application', $id) SET \
                 name = $name, description = $description, asset_code = $asset_code, \
                 parent_asset_code = $parent_asset_code, org_unit_id = $org_unit_id, \
                 kind = $kind, lifecycle_phase = $lifecycle_phase",
            )
            .bind(("id", id))
            .bind(("name", app.name.clone()))
            .bind(("description", app.description.clone()))
            .bind(("asset_code", app.asset_code.clone()))
            .bind(("parent_asset_code", app.parent_asset_code.clone()))
            .bind(("org_unit_id", app.org_unit_id))
            .bind(("kind", app.kind.to_string()))
            .bind(("lifecycle_phase", app.lifecycle_phase.to_string()))
            .await
            .context("Updating application")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Updating application")?;

        Ok(())
    }

    pub(crate) async fn replace_tags(&self, id: i64, tags: &[String]) -> Result<(), DatabaseError> {
        self.replace_collection(id, "tags", tags).await
    }

    pub(crate) async fn replace_aliases(
        &self,
        id: i64,
        aliases: &[String],
    ) -> Result<(), DatabaseError> {
        self.replace_collection(id, "aliases", aliases).await
    }

    async fn replace_collection(
        &self,
        id: i64,
        field: &'static str,
        values: &[String],
    ) -> Result<(), DatabaseError> {
        self.db
            .query(format!("UPDATE type::thing('application', $id) SET {field} = $values"))
            .bind(("id", id))
            .bind(("values", values.to_vec()))
            .await
            .context("Replacing collection")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Replacing collection")?;

        Ok(())
    }

    pub(crate) async fn get_by_id(&self, id: i64) -> Result<Option<ApplicationRow>, DatabaseError> {
        let mut rows = self
            .db
            .query(format!("SELECT {SELECT_FIELDS} FROM type::thing('application', $id)"))
            .bind(("id", id))
            .await
            .context("Loading application")?
            .take::<Vec<ApplicationRow>>(0)
            .context("Parsing application")?;

        Ok(rows.pop())
    }

    pub(crate) async fn find_by_ids(
        &self,
        ids: Vec<i64>,
    ) -> Result<Vec<ApplicationRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM application \
                 WHERE record::id(id) IN $ids ORDER BY name ASC"
            ))
            .bind(("ids", ids))
            .await
            .context("Loading applications by ids")?
            .take::<Vec<ApplicationRow>>(0)
            .context("Parsing applications by ids")
    }

    pub(crate) async fn search(&self, query: &str) -> Result<Vec<ApplicationRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM application WHERE \
                 string::lowercase(name) CONTAINS $query \
                 OR string::lowercase(description) CONTAINS $query \
                 OR string::lowercase(asset_code ?? '') CONTAINS $query \
                 ORDER BY name ASC"
            ))
            .bind(("query", query.to_lowercase()))
            .await
            .context("Searching applications")?
            .take::<Vec<ApplicationRow>>(0)
            .context("Parsing application search results")
    }

    pub(crate) async fn find_by_org_units(
        &self,
        org_unit_ids: Vec<i64>,
    ) -> Result<Vec<ApplicationRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM application \
                 WHERE org_unit_id IN $org_unit_ids ORDER BY name ASC"
            ))
            .bind(("org_unit_ids", org_unit_ids))
            .await
            .context("Loading applications by org unit")?
            .take::<Vec<ApplicationRow>>(0)
            .context("Parsing applications by org unit")
    }

    pub(crate) async fn tally_by_org_unit(&self) -> Result<Vec<OrgUnitTallyRow>, DatabaseError> {
        self.db
            .query(
                "SELECT org_unit_id, count() AS count FROM application \
                 GROUP BY org_unit_id ORDER BY org_unit_id ASC",
            )
            .await
            .context("Counting applications by org unit")?
            .take::<Vec<OrgUnitTallyRow>>(0)
            .context("Parsing org unit tallies")
    }

    pub(crate) async fn load_all_tag_sets(&self) -> Result<Vec<Vec<String>>, DatabaseError> {
        self.db
            .query("SELECT VALUE tags FROM application")
            .await
            .context("Loading tag sets")?
            .take::<Vec<Vec<String>>>(0)
            .context("Parsing tag sets")
    }

    pub(crate) async fn find_by_tag(&self, tag: &str) -> Result<Vec<ApplicationRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM application WHERE $tag IN tags ORDER BY name ASC"
            ))
            .bind(("tag", tag.to_owned()))
            .await
            .context("Loading applications by tag")?
            .take::<Vec<ApplicationRow>>(0)
            .context("Parsing applications by tag")
    }

    /// Applications whose asset code matches, excluding `exclude_id`.
    pub(crate) async fn find_by_asset_code(
        &self,
        asset_code: &str,
        exclude_id: i64,
    ) -> Result<Vec<ApplicationRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM application \
                 WHERE asset_code = $asset_code AND record::id(id) != $exclude_id \
                 ORDER BY name ASC"
            ))
            .bind(("asset_code", asset_code.to_owned()))
            .bind(("exclude_id", exclude_id))
            .await
            .context("Loading applications by asset code")?
            .take::<Vec<ApplicationRow>>(0)
            .context("Parsing applications by asset code")
    }

    /// Applications whose parent asset code matches, excluding `exclude_id`.
    pub(crate) async fn find_by_parent_asset_code(
        &self,
        parent_asset_code: &str,
        exclude_id: i64,
    ) -> Result<Vec<ApplicationRow>, DatabaseError> {
        self.db
            .query(format!(
                "SELECT {SELECT_FIELDS} FROM application \
                 WHERE parent_asset_code = $parent_asset_code AND record::id(id) != $exclude_id \
                 ORDER BY name ASC"
            ))
            .bind(("parent_asset_code", parent_asset_code.to_owned()))
            .bind(("exclude_id", exclude_id))
            .await
            .context("Loading applications by parent asset code")?
            .take::<Vec<ApplicationRow>>(0)
            .context("Parsing applications by parent asset code")
    }
}
