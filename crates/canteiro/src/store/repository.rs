//! Keyed access to single projects over the `projects` collection.

use super::{DocumentStore, StoreError, PROJECTS_KEY};
use crate::model::{EntityId, Project};

/// `get`/`put`/`delete` by project id. Backed by the same whole-collection
/// snapshot the mutation operations work on, so both can be mixed freely.
pub struct ProjectRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> ProjectRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn all(&self) -> Vec<Project> {
        self.store.load(PROJECTS_KEY)
    }

    pub fn get(&self, id: EntityId) -> Option<Project> {
        self.all().into_iter().find(|p| p.id == id)
    }

    /// Replaces the project with the same id in place, or appends it.
    pub fn put(&self, project: Project) -> Result<(), StoreError> {
        let mut projects = self.all();
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => projects.push(project),
        }
        self.store.try_save(PROJECTS_KEY, &projects)
    }

    /// Returns whether a project was removed.
    pub fn delete(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut projects = self.all();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Ok(false);
        }
        self.store.try_save(PROJECTS_KEY, &projects)?;
        Ok(true)
    }
}
