use atlas_database::{Database, DatabaseError, DatabaseErrorExt};
use atlas_domain::orgunit::OrgUnit;
use surrealdb::types::SurrealValue;

pub(crate) const TABLE: &str = "org_unit";

const SELECT_FIELDS: &str = "record::id(id) AS id, name, description, parent_id";

/// Storage projection of one organisational unit.
#[derive(Debug, SurrealValue)]
pub(crate) struct OrgUnitRow {
    id: i64,
    name: String,
    description: String,
    parent_id: Option<i64>,
}

impl From<OrgUnitRow> for OrgUnit {
    fn from(row: OrgUnitRow) -> Self {
        Self {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            parent_id: row.parent_id,
        }
    }
}

/// Parent link only, for walking the forest without loading full rows.
#[derive(Debug, SurrealValue)]
pub(crate) struct OrgUnitLink {
    pub id: i64,
    pub parent_id: Option<i64>,
}

/// Data access for the `org_unit` table.
#[derive(Debug, Clone)]
pub(crate) struct OrgUnitDao {
    db: Database,
}

impl OrgUnitDao {
    pub(crate) const fn new(db: Database) -> Self {
        Self { db }
    }

    pub(crate) async fn insert(
        &self,
        id: i64,
        name: &str,
        description: &str,
        parent_id: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.db
            .query(
                "CREATE type::thing('org_unit', $id) SET \
                 name = $name, description = $description, parent_id = $parent_id",
            )
            .bind(("id", id))
            .bind(("name", name.to_owned()))
            .bind(("description", description.to_owned()))
            .bind(("parent_id", parent_id))
            .await
            .context("Inserting org unit")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Inserting org unit")?;

        Ok(())
    }

    pub(crate) async fn find_all(&self) -> Result<Vec<OrgUnitRow>, DatabaseError> {
        self.db
            .query(format!("SELECT {SELECT_FIELDS} FROM org_unit ORDER BY name ASC"))
            .await
            .context("Loading org units")?
            .take::<Vec<OrgUnitRow>>(0)
            .context("Parsing org units")
    }

    pub(crate) async fn get_by_id(&self, id: i64) -> Result<Option<OrgUnitRow>, DatabaseError> {
        let mut rows = self
            .db
            .query(format!("SELECT {SELECT_FIELDS} FROM type::thing('org_unit', $id)"))
            .bind(("id", id))
            .await
            .context("Loading org unit")?
            .take::<Vec<OrgUnitRow>>(0)
            .context("Parsing org unit")?;

        Ok(rows.pop())
    }

    pub(crate) async fn load_links(&self) -> Result<Vec<OrgUnitLink>, DatabaseError> {
        self.db
            .query("SELECT record::id(id) AS id, parent_id FROM org_unit")
            .await
            .context("Loading org unit links")?
            .take::<Vec<OrgUnitLink>>(0)
            .context("Parsing org unit links")
    }
}
