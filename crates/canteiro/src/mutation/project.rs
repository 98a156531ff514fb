use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{ConstructionType, EntityId, Project, ProjectStatus};

use super::validate::{amount, required, required_date, strictly_before};
use super::{edit_project, EditContext};

/// The scalar attributes of a project, as submitted by the create and edit
/// forms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDetails {
    pub name: String,
    pub address: String,
    pub construction_type: ConstructionType,
    pub responsible_engineer: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
    pub total_area: f64,
    pub number_of_units: u32,
    pub budget: f64,
    pub spent: f64,
    pub description: String,
}

impl From<&Project> for ProjectDetails {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            address: project.address.clone(),
            construction_type: project.construction_type,
            responsible_engineer: project.responsible_engineer.clone(),
            status: project.status,
            start_date: project.start_date,
            estimated_end_date: project.estimated_end_date,
            total_area: project.total_area,
            number_of_units: project.number_of_units,
            budget: project.budget,
            spent: project.spent,
            description: project.description.clone(),
        }
    }
}

impl ProjectDetails {
    fn validated(self) -> Result<Self, ValidationError> {
        let start = required_date("startDate", self.start_date)?;
        let end = required_date("estimatedEndDate", self.estimated_end_date)?;
        strictly_before("startDate", Some(start), "estimatedEndDate", Some(end))?;

        Ok(Self {
            name: required("name", &self.name)?,
            address: required("address", &self.address)?,
            responsible_engineer: required("responsibleEngineer", &self.responsible_engineer)?,
            description: required("description", &self.description)?,
            total_area: amount("totalArea", self.total_area)?,
            budget: amount("budget", self.budget)?,
            spent: amount("spent", self.spent)?,
            ..self
        })
    }

    fn apply_to(self, project: &mut Project) {
        project.name = self.name;
        project.address = self.address;
        project.construction_type = self.construction_type;
        project.responsible_engineer = self.responsible_engineer;
        project.status = self.status;
        project.start_date = self.start_date;
        project.estimated_end_date = self.estimated_end_date;
        project.total_area = self.total_area;
        project.number_of_units = self.number_of_units;
        project.budget = self.budget;
        project.spent = self.spent;
        project.description = self.description;
    }
}

/// Appends a new project with a fresh id and empty owned collections.
pub fn create_project(
    projects: &[Project],
    details: ProjectDetails,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let details = details.validated()?;

    let mut project = Project::new(ctx.next_id(), String::new());
    details.apply_to(&mut project);

    let mut updated = projects.to_vec();
    updated.push(project);
    Ok(updated)
}

/// Any status may follow any other, including leaving `completed`.
pub fn update_project_status(
    projects: &[Project],
    project_id: EntityId,
    status: ProjectStatus,
    _ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    edit_project(projects, project_id, "update_project_status", |project| {
        project.status = status;
        Ok(())
    })
}

/// Replaces every scalar attribute; owned collections are kept.
pub fn update_project_details(
    projects: &[Project],
    project_id: EntityId,
    details: ProjectDetails,
    _ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let details = details.validated()?;
    edit_project(projects, project_id, "update_project_details", |project| {
        details.apply_to(project);
        Ok(())
    })
}

pub fn rename_project(
    projects: &[Project],
    project_id: EntityId,
    name: &str,
    _ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let name = required("name", name)?;
    edit_project(projects, project_id, "rename_project", |project| {
        project.name = name;
        Ok(())
    })
}

/// Sets or clears the user-entered materials budget.
pub fn set_materials_budget(
    projects: &[Project],
    project_id: EntityId,
    budget: Option<f64>,
    _ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let budget = budget.map(|b| amount("materialsBudget", b)).transpose()?;
    edit_project(projects, project_id, "set_materials_budget", |project| {
        project.materials_budget = budget;
        Ok(())
    })
}

pub fn delete_project(
    projects: &[Project],
    project_id: EntityId,
    _ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let updated: Vec<Project> = projects
        .iter()
        .filter(|p| p.id != project_id)
        .cloned()
        .collect();
    if updated.len() == projects.len() {
        log::debug!("delete_project: project {} not found, ignoring edit", project_id);
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::model::Material;

    fn details() -> ProjectDetails {
        ProjectDetails {
            name: "Edifício Horizonte".to_string(),
            address: "Rua das Palmeiras, 123".to_string(),
            construction_type: ConstructionType::Residential,
            responsible_engineer: "João Silva".to_string(),
            status: ProjectStatus::Planning,
            start_date: Some(date(2024, 1, 15)),
            estimated_end_date: Some(date(2025, 6, 30)),
            total_area: 5_000.0,
            number_of_units: 24,
            budget: 1_500_000.0,
            spent: 0.0,
            description: "Edifício residencial de 12 andares".to_string(),
        }
    }

    #[test]
    fn test_create_project() {
        let mut ctx = ctx();
        let updated = create_project(&projects(), details(), &mut ctx).unwrap();

        assert_eq!(updated.len(), 3);
        let created = &updated[2];
        assert_eq!(created.id, 100);
        assert_eq!(created.name, "Edifício Horizonte");
        assert_eq!(created.budget, 1_500_000.0);
        assert!(created.materials.is_empty());
        assert!(created.timeline.is_empty());
        assert_eq!(ctx.ids.peek(), 101);
    }

    #[test]
    fn test_create_project_rejects_bad_input() {
        let cases = vec![
            (
                ProjectDetails {
                    name: "  ".to_string(),
                    ..details()
                },
                ValidationError::Required { field: "name" },
            ),
            (
                ProjectDetails {
                    estimated_end_date: None,
                    ..details()
                },
                ValidationError::Required {
                    field: "estimatedEndDate",
                },
            ),
            (
                ProjectDetails {
                    budget: -1.0,
                    ..details()
                },
                ValidationError::InvalidAmount {
                    field: "budget",
                    value: -1.0,
                },
            ),
            (
                ProjectDetails {
                    start_date: Some(date(2025, 6, 30)),
                    ..details()
                },
                ValidationError::DateOrder {
                    start_field: "startDate",
                    start: date(2025, 6, 30),
                    end_field: "estimatedEndDate",
                    end: date(2025, 6, 30),
                },
            ),
        ];

        for (input, expected) in cases {
            let mut ctx = ctx();
            assert_eq!(create_project(&projects(), input, &mut ctx), Err(expected));
            assert_eq!(ctx.ids.peek(), 100);
        }
    }

    #[test]
    fn test_update_details_keeps_collections() {
        let mut projects = projects();
        projects[0].materials.push(Material {
            id: 5,
            ..Default::default()
        });

        let updated = update_project_details(&projects, 1, details(), &mut ctx()).unwrap();
        assert_eq!(updated[0].id, 1);
        assert_eq!(updated[0].address, "Rua das Palmeiras, 123");
        assert_eq!(updated[0].materials.len(), 1);
        assert_eq!(updated[1], projects[1]);
    }

    #[test]
    fn test_update_details_round_trips_from_project() {
        let mut ctx = ctx();
        let created = create_project(&[], details(), &mut ctx).unwrap();
        let prefill = ProjectDetails::from(&created[0]);
        assert_eq!(prefill, details());
    }

    #[test]
    fn test_status_transitions_are_free() {
        let mut ctx = locked_ctx();
        let mut list = projects();
        for status in [
            ProjectStatus::Completed,
            ProjectStatus::Planning,
            ProjectStatus::OnHold,
            ProjectStatus::Completed,
            ProjectStatus::InProgress,
        ] {
            list = update_project_status(&list, 1, status, &mut ctx).unwrap();
            assert_eq!(list[0].status, status);
        }
    }

    #[test]
    fn test_rename_project() {
        let updated = rename_project(&projects(), 2, " Parque Verde II ", &mut ctx()).unwrap();
        assert_eq!(updated[1].name, "Parque Verde II");

        let err = rename_project(&projects(), 2, "", &mut ctx()).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "name" });
    }

    #[test]
    fn test_set_materials_budget() {
        let updated = set_materials_budget(&projects(), 1, Some(12_000.0), &mut ctx()).unwrap();
        assert_eq!(updated[0].materials_budget, Some(12_000.0));

        let cleared = set_materials_budget(&updated, 1, None, &mut ctx()).unwrap();
        assert_eq!(cleared[0].materials_budget, None);

        assert!(set_materials_budget(&projects(), 1, Some(f64::NAN), &mut ctx()).is_err());
    }

    #[test]
    fn test_delete_project() {
        let updated = delete_project(&projects(), 1, &mut ctx()).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id, 2);

        let again = delete_project(&updated, 1, &mut ctx()).unwrap();
        assert_eq!(again, updated);
    }
}
