use crate::dao::{OrgUnitDao, OrgUnitLink, TABLE};
use crate::error::OrganizationError;
use atlas_database::Database;
use atlas_domain::orgunit::{NewOrgUnit, OrgUnit};
use std::collections::VecDeque;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Organisational-unit service: unit lookups plus the subtree closure
/// used to scope application queries.
#[derive(Debug, Clone)]
pub struct OrgUnitService {
    db: Database,
    dao: OrgUnitDao,
}

impl OrgUnitService {
    #[must_use]
    pub fn new(db: Database) -> Self {
        let dao = OrgUnitDao::new(db.clone());
        Self { db, dao }
    }

    /// Persists a new unit and returns it with its assigned id.
    ///
    /// # Errors
    /// Returns [`OrganizationError::Database`] if the write fails.
    pub async fn create(&self, new_unit: NewOrgUnit) -> Result<OrgUnit, OrganizationError> {
        let id = self.db.next_id(TABLE).await?;
        self.dao.insert(id, &new_unit.name, &new_unit.description, new_unit.parent_id).await?;

        debug!(id, name = %new_unit.name, "Org unit created");

        Ok(OrgUnit {
            id: Some(id),
            name: new_unit.name,
            description: new_unit.description,
            parent_id: new_unit.parent_id,
        })
    }

    /// All units, ordered by name.
    ///
    /// # Errors
    /// Returns [`OrganizationError::Database`] on read failure.
    pub async fn find_all(&self) -> Result<Vec<OrgUnit>, OrganizationError> {
        Ok(self.dao.find_all().await?.into_iter().map(OrgUnit::from).collect())
    }

    /// Single unit, or `None` when absent.
    ///
    /// # Errors
    /// Returns [`OrganizationError::Database`] on read failure.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<OrgUnit>, OrganizationError> {
        Ok(self.dao.get_by_id(id).await?.map(OrgUnit::from))
    }

    /// Ids of `root` and every unit below it.
    ///
    /// The closure always contains `root` itself, never contains
    /// duplicates, and terminates on arbitrary parent graphs (a visited
    /// set guards against cycles in corrupted data).
    ///
    /// # Errors
    /// Returns [`OrganizationError::Database`] on read failure.
    pub async fn descendant_ids(&self, root: i64) -> Result<Vec<i64>, OrganizationError> {
        let links = self.dao.load_links().await?;
        Ok(collect_subtree(root, &links))
    }
}

fn collect_subtree(root: i64, links: &[OrgUnitLink]) -> Vec<i64> {
    let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
    for link in links {
        if let Some(parent) = link.parent_id {
            children.entry(parent).or_default().push(link.id);
        }
    }

    let mut result = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([root]);

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        result.push(id);
        if let Some(kids) = children.get(&id) {
            queue.extend(kids.iter().copied());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: i64, parent_id: Option<i64>) -> OrgUnitLink {
        OrgUnitLink { id, parent_id }
    }

    #[test]
    fn subtree_contains_root_and_all_descendants() {
        let links = [
            link(1, None),
            link(2, Some(1)),
            link(3, Some(1)),
            link(4, Some(2)),
            link(5, None),
        ];
        let mut ids = collect_subtree(1, &links);
        ids.sort_unstable();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn subtree_of_leaf_is_just_the_leaf() {
        let links = [link(1, None), link(2, Some(1))];
        assert_eq!(collect_subtree(2, &links), [2]);
    }

    #[test]
    fn subtree_terminates_on_cyclic_parent_data() {
        // 1 -> 2 -> 3 -> 1 should not loop forever.
        let links = [link(1, Some(3)), link(2, Some(1)), link(3, Some(2))];
        let mut ids = collect_subtree(1, &links);
        ids.sort_unstable();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn unknown_root_yields_only_itself() {
        let links = [link(1, None)];
        assert_eq!(collect_subtree(42, &links), [42]);
    }
}
