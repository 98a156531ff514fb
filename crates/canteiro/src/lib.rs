pub mod config;
pub mod derive;
pub mod error;
pub mod model;
pub mod mutation;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod weather;

pub use config::{load_config, load_config_from_str, Config};
pub use derive::{PortfolioOverview, ProjectSummary};
pub use error::{CanteiroError, ConfigError, Result, ValidationError};
pub use model::{EntityId, Material, Phase, Project, ProjectStatus, Visit};
pub use mutation::{EditContext, EditPolicy, IdAllocator};
pub use session::Session;
pub use store::{Database, DocumentStore, ProjectRepository, StoreError, PROJECTS_KEY};
