use crate::model::{EntityId, Project};

/// Hands out entity ids that are unique across the whole store.
///
/// Seeded from the largest id present in the loaded snapshot, so ids never
/// collide with stored data even after a reload or an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: EntityId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdAllocator {
    pub fn starting_at(next: EntityId) -> Self {
        Self { next: next.max(1) }
    }

    pub fn seeded_from(projects: &[Project]) -> Self {
        Self::starting_at(max_id(projects).saturating_add(1))
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Never moves backwards.
    pub fn observe(&mut self, id: EntityId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }

    pub fn peek(&self) -> EntityId {
        self.next
    }
}

fn max_id(projects: &[Project]) -> EntityId {
    projects
        .iter()
        .flat_map(|project| {
            std::iter::once(project.id)
                .chain(project.materials.iter().map(|m| m.id))
                .chain(project.timeline.iter().map(|p| p.id))
                .chain(project.milestones().map(|m| m.id))
                .chain(project.tasks().map(|t| t.id))
                .chain(project.visits.iter().map(|v| v.id))
                .chain(project.visits.iter().flat_map(|v| v.expenses.iter().map(|e| e.id)))
                .chain(project.documents.iter().flat_map(|c| c.items.iter().map(|d| d.id)))
                .chain(project.photos.iter().map(|p| p.id))
        })
        .max()
        .unwrap_or(0)
}

fn assign(id: &mut EntityId, ids: &mut IdAllocator) -> usize {
    if *id == 0 {
        *id = ids.next_id();
        1
    } else {
        0
    }
}

/// Gives every entity stored without an id (legacy phases have none) a fresh
/// one. Returns how many ids were assigned.
pub fn backfill_missing_ids(projects: &mut [Project], ids: &mut IdAllocator) -> usize {
    let mut assigned = 0;
    for project in projects.iter_mut() {
        assigned += assign(&mut project.id, ids);
        for material in &mut project.materials {
            assigned += assign(&mut material.id, ids);
        }
        for phase in &mut project.timeline {
            assigned += assign(&mut phase.id, ids);
            for milestone in &mut phase.milestones {
                assigned += assign(&mut milestone.id, ids);
            }
            for task in &mut phase.tasks {
                assigned += assign(&mut task.id, ids);
            }
        }
        for visit in &mut project.visits {
            assigned += assign(&mut visit.id, ids);
            for expense in &mut visit.expenses {
                assigned += assign(&mut expense.id, ids);
            }
        }
        for category in &mut project.documents {
            for document in &mut category.items {
                assigned += assign(&mut document.id, ids);
            }
        }
        for photo in &mut project.photos {
            assigned += assign(&mut photo.id, ids);
        }
    }
    assigned
}
