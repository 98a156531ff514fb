//! The project document tree.
//!
//! Ownership is strictly tree-shaped: a [`Project`] owns its materials,
//! phases, visits, document categories and photos, and nothing is shared
//! between projects. Every collection defaults to empty when a stored
//! document omits it.

pub mod de;
pub mod document;
pub mod material;
pub mod photo;
pub mod project;
pub mod timeline;
pub mod visit;

pub use document::{Document, DocumentCategory, DocumentStatus, DocumentType};
pub use material::Material;
pub use photo::Photo;
pub use project::{ConstructionType, Project, ProjectStatus};
pub use timeline::{Milestone, Phase, Task, TaskStatus};
pub use visit::{Expense, ExpenseType, Visit};

/// Identifier for every entity in the store. Unique across the whole store,
/// not only within the owning collection.
pub type EntityId = u64;
