//! In-memory project state kept in step with the document store.
//!
//! The session's project list is what a view renders. Every accepted edit
//! replaces that list and then persists it; a failed save is logged and the
//! in-memory list stays authoritative until the next successful write.

use chrono::{Local, NaiveDate};
use tracing::info_span;

use crate::config::Config;
use crate::derive::{portfolio_overview, project_summary, PortfolioOverview, ProjectSummary};
use crate::error::ValidationError;
use crate::model::{EntityId, Project};
use crate::mutation::{backfill_missing_ids, EditContext, EditPolicy, IdAllocator};
use crate::store::{DocumentStore, StoreError, PROJECTS_KEY};

/// Source of the edit date.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct Session {
    store: DocumentStore,
    config: Config,
    projects: Vec<Project>,
    ids: IdAllocator,
    policy: EditPolicy,
    clock: Clock,
}

impl Session {
    /// Opens the configured database and loads the `projects` snapshot.
    pub fn open(config: Config) -> Result<Self, StoreError> {
        Self::open_with_clock(config, local_today)
    }

    /// [`open`](Self::open) with `clock` dating both edits and the upgrade
    /// of legacy snapshots.
    pub fn open_with_clock(config: Config, clock: Clock) -> Result<Self, StoreError> {
        let store = DocumentStore::open(&config)?;
        Ok(Self::with_store_and_clock(store, config, clock))
    }

    pub fn in_memory(config: Config) -> Result<Self, StoreError> {
        let store = DocumentStore::open_in_memory(&config)?;
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: DocumentStore, config: Config) -> Self {
        Self::with_store_and_clock(store, config, local_today)
    }

    pub fn with_store_and_clock(store: DocumentStore, config: Config, clock: Clock) -> Self {
        if let Err(e) = store.drop_legacy_collections() {
            log::warn!("Failed to drop legacy collections: {}", e);
        }

        let (projects, ids) = load_projects(&store, clock());
        log::info!(
            "Session loaded {} projects, next id {}",
            projects.len(),
            ids.peek()
        );

        Self {
            store,
            policy: EditPolicy::from_config(&config),
            config,
            projects,
            ids,
            clock,
        }
    }

    /// Replaces the clock used to date edits.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: EntityId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Runs one edit against the current list.
    ///
    /// On `Ok` the returned list becomes current and is saved. On `Err`
    /// nothing changes, including the id allocator.
    pub fn apply<F>(&mut self, op: F) -> Result<&[Project], ValidationError>
    where
        F: FnOnce(&[Project], &mut EditContext) -> Result<Vec<Project>, ValidationError>,
    {
        let _span = info_span!("session.apply", projects = self.projects.len()).entered();

        let mut ctx = EditContext::new(self.ids.clone(), self.today(), self.policy);
        let updated = op(&self.projects, &mut ctx)?;

        self.ids = ctx.ids;
        self.projects = updated;
        if !self.store.save(PROJECTS_KEY, &self.projects) {
            log::warn!("Edit kept in memory only; the store was not updated");
        }
        Ok(&self.projects)
    }

    /// Re-reads the stored snapshot, dropping unsaved in-memory state. Ids
    /// already handed out are never reused.
    pub fn reload(&mut self) {
        let _span = info_span!("session.reload").entered();
        let (projects, ids) = load_projects(&self.store, self.today());
        if ids.peek() > self.ids.peek() {
            self.ids = ids;
        }
        self.projects = projects;
    }

    pub fn summary(&self, id: EntityId, today: NaiveDate) -> Option<ProjectSummary> {
        self.project(id)
            .map(|project| project_summary(project, today, &self.config.alerts))
    }

    pub fn portfolio(&self) -> PortfolioOverview {
        portfolio_overview(&self.projects)
    }
}

fn load_projects(store: &DocumentStore, today: NaiveDate) -> (Vec<Project>, IdAllocator) {
    let mut projects: Vec<Project> = store.load_as_of(PROJECTS_KEY, today);
    let mut ids = IdAllocator::seeded_from(&projects);

    let assigned = backfill_missing_ids(&mut projects, &mut ids);
    if assigned > 0 {
        log::info!("Assigned ids to {} stored entities", assigned);
        store.save(PROJECTS_KEY, &projects);
    }

    (projects, ids)
}
