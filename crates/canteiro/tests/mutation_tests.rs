//! End-to-end edit workflows through a persisted session.

mod common;

use canteiro::derive::{low_stock_alerts, overall_progress, visits_expense_total};
use canteiro::model::{DocumentStatus, DocumentType, ExpenseType, ProjectStatus, TaskStatus};
use canteiro::mutation::{
    add_document, add_material, add_photo, add_visit, add_visit_expense, consume_material,
    create_project, delete_material, delete_project, edit_material, update_document_status,
    update_project_status, upsert_milestone, upsert_phase, upsert_task, DocumentInput,
    ExpenseInput, MaterialInput, MilestoneInput, PhaseInput, PhotoInput, ProjectDetails,
    TaskInput, VisitInput,
};
use canteiro::{Config, ValidationError};
use common::*;

fn horizonte() -> ProjectDetails {
    ProjectDetails {
        name: "Edifício Horizonte".to_string(),
        address: "Rua das Palmeiras, 123".to_string(),
        responsible_engineer: "João Silva".to_string(),
        start_date: Some(date(2024, 1, 15)),
        estimated_end_date: Some(date(2025, 6, 30)),
        total_area: 5_000.0,
        number_of_units: 24,
        budget: 1_500_000.0,
        description: "Edifício residencial de 12 andares".to_string(),
        ..Default::default()
    }
}

fn bricks(quantity: f64) -> MaterialInput {
    MaterialInput {
        name: "Tijolos".to_string(),
        category: "Alvenaria".to_string(),
        quantity,
        unit: "milheiro".to_string(),
        unit_price: 850.0,
        supplier: "Cerâmica Boa Vista".to_string(),
        min_quantity: None,
    }
}

#[test]
fn test_full_project_lifecycle_survives_reopen() {
    let harness = TestHarness::new();
    let mut session = harness.session();

    session
        .apply(|projects, ctx| create_project(projects, horizonte(), ctx))
        .unwrap();
    let project_id = session.projects()[0].id;

    session
        .apply(|projects, ctx| add_material(projects, project_id, bricks(100.0), ctx))
        .unwrap();
    let material_id = session.projects()[0].materials[0].id;

    session
        .apply(|projects, ctx| {
            upsert_phase(
                projects,
                project_id,
                PhaseInput {
                    id: None,
                    name: "Fundação".to_string(),
                    start_date: Some(date(2024, 1, 15)),
                    end_date: Some(date(2024, 3, 15)),
                    progress: 60.0,
                },
                ctx,
            )
        })
        .unwrap();
    let phase_id = session.projects()[0].timeline[0].id;

    session
        .apply(|projects, ctx| {
            upsert_milestone(
                projects,
                project_id,
                phase_id,
                MilestoneInput {
                    id: None,
                    description: "Concretagem".to_string(),
                    date: Some(date(2024, 2, 20)),
                },
                ctx,
            )
        })
        .unwrap();
    session
        .apply(|projects, ctx| {
            upsert_task(
                projects,
                project_id,
                phase_id,
                TaskInput {
                    id: None,
                    name: "Escavação".to_string(),
                    status: TaskStatus::InProgress,
                    progress: 60.0,
                },
                ctx,
            )
        })
        .unwrap();

    session
        .apply(|projects, ctx| {
            add_visit(
                projects,
                project_id,
                VisitInput {
                    date: Some(date(2024, 6, 20)),
                    time: "09:00".to_string(),
                    purpose: "Vistoria".to_string(),
                    participants: "João Silva".to_string(),
                    location: "Canteiro".to_string(),
                    observations: String::new(),
                },
                ctx,
            )
        })
        .unwrap();
    let visit_id = session.projects()[0].visits[0].id;
    session
        .apply(|projects, ctx| {
            add_visit_expense(
                projects,
                project_id,
                visit_id,
                ExpenseInput {
                    kind: ExpenseType::Transport,
                    amount: 85.0,
                    date: Some(date(2024, 6, 20)),
                    description: "Combustível".to_string(),
                    receipt: true,
                },
                ctx,
            )
        })
        .unwrap();

    session
        .apply(|projects, ctx| {
            add_document(
                projects,
                project_id,
                DocumentInput {
                    kind: DocumentType::Permits,
                    name: "Alvará".to_string(),
                    status: DocumentStatus::Pending,
                    expiry_date: Some(date(2025, 1, 31)),
                },
                ctx,
            )
        })
        .unwrap();
    let document_id = session.projects()[0].documents[0].items[0].id;
    session
        .apply(|projects, ctx| {
            update_document_status(projects, project_id, document_id, DocumentStatus::Approved, ctx)
        })
        .unwrap();

    session
        .apply(|projects, ctx| {
            add_photo(
                projects,
                project_id,
                PhotoInput {
                    url: "https://example.com/laje.jpg".to_string(),
                    description: "Laje".to_string(),
                    date: Some(date(2024, 6, 20)),
                    location: "Bloco A".to_string(),
                },
                ctx,
            )
        })
        .unwrap();

    let ids: Vec<u64> = vec![
        project_id,
        material_id,
        phase_id,
        visit_id,
        document_id,
        session.projects()[0].photos[0].id,
    ];
    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());

    let reopened = harness.session();
    assert_eq!(reopened.projects(), session.projects());

    let project = &reopened.projects()[0];
    assert_eq!(project.materials[0].min_quantity, 20.0);
    assert_eq!(project.materials[0].month, 6);
    assert_eq!(project.timeline[0].milestones.len(), 1);
    assert_eq!(project.timeline[0].tasks.len(), 1);
    assert_eq!(visits_expense_total(project), 85.0);
    assert_eq!(project.documents[0].items[0].status, DocumentStatus::Approved);
    assert_eq!(overall_progress(project), 60.0);
}

#[test]
fn test_low_stock_scenario() {
    let harness = TestHarness::new();
    harness.seed(&[ProjectBuilder::new(1).build()]);
    let mut session = harness.session();

    let input = MaterialInput {
        min_quantity: Some(20.0),
        ..bricks(100.0)
    };
    session
        .apply(|projects, ctx| add_material(projects, 1, input, ctx))
        .unwrap();
    let material_id = session.projects()[0].materials[0].id;
    assert!(low_stock_alerts(&session.projects()[0]).is_empty());

    session
        .apply(|projects, ctx| consume_material(projects, 1, material_id, 90.0, ctx))
        .unwrap();
    assert!(low_stock_alerts(&session.projects()[0]).is_empty());

    let mut lowered = session.projects()[0].materials[0].clone();
    lowered.quantity = 15.0;
    session
        .apply(|projects, ctx| edit_material(projects, 1, lowered, ctx))
        .unwrap();

    let alerts = low_stock_alerts(&session.projects()[0]);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].consumed_quantity, 90.0);
}

#[test]
fn test_delete_material_twice_matches_once() {
    let harness = TestHarness::new();
    harness.seed(&[ProjectBuilder::new(1)
        .material(MaterialBuilder::new(2).quantity(10.0).build())
        .material(MaterialBuilder::new(3).quantity(5.0).build())
        .build()]);
    let mut session = harness.session();

    session
        .apply(|projects, ctx| delete_material(projects, 1, 2, ctx))
        .unwrap();
    let once = session.projects().to_vec();
    session
        .apply(|projects, ctx| delete_material(projects, 1, 2, ctx))
        .unwrap();

    assert_eq!(session.projects(), once.as_slice());
    assert_eq!(harness.stored_projects(), once);
}

#[test]
fn test_stale_ids_are_ignored() {
    let harness = TestHarness::new();
    harness.seed(&[ProjectBuilder::new(1).build()]);
    let mut session = harness.session();
    let before = session.projects().to_vec();

    session
        .apply(|projects, ctx| add_material(projects, 99, bricks(10.0), ctx))
        .unwrap();
    session
        .apply(|projects, ctx| consume_material(projects, 1, 42, 5.0, ctx))
        .unwrap();
    session
        .apply(|projects, ctx| delete_project(projects, 77, ctx))
        .unwrap();

    assert_eq!(session.projects(), before.as_slice());
}

#[test]
fn test_rejected_edit_is_not_persisted() {
    let harness = TestHarness::new();
    harness.seed(&[ProjectBuilder::new(1).build()]);
    let mut session = harness.session();

    let err = session
        .apply(|projects, ctx| add_material(projects, 1, bricks(f64::NAN), ctx))
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidAmount { field: "quantity", .. }));
    assert!(harness.stored_projects()[0].materials.is_empty());
}

#[test]
fn test_completed_lock() {
    let mut config = Config::default();
    config.edits.lock_completed_projects = true;
    let harness = TestHarness::with_config(config);
    harness.seed(&[ProjectBuilder::new(1)
        .status(ProjectStatus::Completed)
        .build()]);
    let mut session = harness.session();

    let err = session
        .apply(|projects, ctx| add_material(projects, 1, bricks(10.0), ctx))
        .unwrap_err();
    assert_eq!(err, ValidationError::ProjectLocked(1));

    session
        .apply(|projects, ctx| update_project_status(projects, 1, ProjectStatus::InProgress, ctx))
        .unwrap();
    session
        .apply(|projects, ctx| add_material(projects, 1, bricks(10.0), ctx))
        .unwrap();
    assert_eq!(session.projects()[0].materials.len(), 1);
}

#[test]
fn test_configured_reorder_ratio() {
    let mut config = Config::default();
    config.alerts.reorder_ratio = 0.5;
    let harness = TestHarness::with_config(config);
    harness.seed(&[ProjectBuilder::new(1).build()]);
    let mut session = harness.session();

    session
        .apply(|projects, ctx| add_material(projects, 1, bricks(9.0), ctx))
        .unwrap();
    assert_eq!(session.projects()[0].materials[0].min_quantity, 5.0);
}
