use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{Document, DocumentCategory, DocumentStatus, DocumentType, EntityId, Project};

use super::validate::required;
use super::{edit_owned, EditContext};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInput {
    pub kind: DocumentType,
    pub name: String,
    pub status: DocumentStatus,
    pub expiry_date: Option<NaiveDate>,
}

fn find_document(project: &mut Project, document_id: EntityId) -> Option<&mut Document> {
    project
        .documents
        .iter_mut()
        .flat_map(|category| category.items.iter_mut())
        .find(|doc| doc.id == document_id)
}

/// Files a document under its category, creating the category on first use.
pub fn add_document(
    projects: &[Project],
    project_id: EntityId,
    input: DocumentInput,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let name = required("name", &input.name)?;

    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "add_document", |project| {
        let document = Document {
            id: ctx.next_id(),
            name,
            status: input.status,
            expiry_date: input.expiry_date,
        };
        match project.documents.iter_mut().find(|c| c.kind == input.kind) {
            Some(category) => category.items.push(document),
            None => project.documents.push(DocumentCategory {
                kind: input.kind,
                items: vec![document],
            }),
        }
        Ok(())
    })
}

pub fn update_document_status(
    projects: &[Project],
    project_id: EntityId,
    document_id: EntityId,
    status: DocumentStatus,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "update_document_status", |project| {
        match find_document(project, document_id) {
            Some(document) => document.status = status,
            None => log::debug!(
                "update_document_status: document {} not found, ignoring edit",
                document_id
            ),
        }
        Ok(())
    })
}

/// Removes the document from whichever category holds it. Emptied
/// categories are kept.
pub fn remove_document(
    projects: &[Project],
    project_id: EntityId,
    document_id: EntityId,
    ctx: &mut EditContext,
) -> Result<Vec<Project>, ValidationError> {
    let policy = ctx.policy;
    edit_owned(projects, project_id, &policy, "remove_document", |project| {
        for category in &mut project.documents {
            category.items.retain(|doc| doc.id != document_id);
        }
        Ok(())
    })
}
