//! Builder patterns for creating test documents programmatically.

#![allow(dead_code)]

use chrono::NaiveDate;

use canteiro::model::{Material, Milestone, Phase, Project, ProjectStatus, Task, TaskStatus};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Builder for creating `Project` instances.
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    /// A project with an id, a name and nothing else.
    pub fn new(id: u64) -> Self {
        Self {
            project: Project::new(id, format!("Obra {}", id)),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.project.name = name.to_string();
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.project.status = status;
        self
    }

    pub fn schedule(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.project.start_date = Some(start);
        self.project.estimated_end_date = Some(end);
        self
    }

    pub fn budget(mut self, budget: f64, spent: f64) -> Self {
        self.project.budget = budget;
        self.project.spent = spent;
        self
    }

    pub fn material(mut self, material: Material) -> Self {
        self.project.materials.push(material);
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.project.timeline.push(phase);
        self
    }

    pub fn build(self) -> Project {
        self.project
    }
}

/// Builder for creating `Material` instances.
pub struct MaterialBuilder {
    material: Material,
}

impl MaterialBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            material: Material {
                id,
                name: format!("Material {}", id),
                category: "Estrutural".to_string(),
                unit: "un".to_string(),
                supplier: "Fornecedor".to_string(),
                month: 1,
                ..Default::default()
            },
        }
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.material.quantity = quantity;
        self
    }

    pub fn consumed(mut self, consumed: f64) -> Self {
        self.material.consumed_quantity = consumed;
        self
    }

    pub fn min_quantity(mut self, min_quantity: f64) -> Self {
        self.material.min_quantity = min_quantity;
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.material.unit_price = price;
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.material.month = month;
        self
    }

    pub fn build(self) -> Material {
        self.material
    }
}

/// Builder for creating `Phase` instances.
pub struct PhaseBuilder {
    phase: Phase,
}

impl PhaseBuilder {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            phase: Phase {
                id,
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.phase.start_date = Some(start);
        self.phase.end_date = Some(end);
        self
    }

    pub fn progress(mut self, progress: f64) -> Self {
        self.phase.progress = progress;
        self
    }

    pub fn milestone(mut self, id: u64, description: &str, date: NaiveDate) -> Self {
        self.phase.milestones.push(Milestone {
            id,
            description: description.to_string(),
            date: Some(date),
        });
        self
    }

    pub fn task(mut self, id: u64, status: TaskStatus, progress: f64) -> Self {
        self.phase.tasks.push(Task {
            id,
            name: format!("Tarefa {}", id),
            status,
            progress,
        });
        self
    }

    pub fn build(self) -> Phase {
        self.phase
    }
}
