use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{EntityId, Photo, Project};

use super::validate::{required, required_date};
use super::{edit_owned, remove_by_id, EditContext};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoInput {
    pub url: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub location: String,
}

pub fn add_photo(
    projects: &[Project],
    project_id: EntityId,
    input: PhotoInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let url = required("url", &input.url)?;
    let description = required("description", &input.description)?;
    let date = required_date("date", input.date)?;
    let location = required("location", &input.location)?;

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "add_photo", |project| {
        project.photos.push(Photo {
            id: ctx.next_id(),
            url,
            description,
            date: Some(date),
            location,
        });
        Ok(())
    })
}

pub fn remove_photo(
    projects: &[Project],
    project_id: EntityId,
    photo_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "remove_photo", |project| {
        remove_by_id(&mut project.photos, photo_id, |p| p.id);
        Ok(())
    })
}
