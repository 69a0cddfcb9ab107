use diffable_core::{
    AddContactForm, ContactListService, ContactSection, ContactServiceError, EditOp, Position,
    ReconcilerConfig, SnapshotError,
};

fn seeded() -> ContactListService {
    ContactListService::seeded(ReconcilerConfig::default()).expect("seed should succeed")
}

fn titles(service: &ContactListService) -> Vec<(String, Vec<String>)> {
    service
        .rows()
        .into_iter()
        .map(|section| {
            (
                section.header.title,
                section.rows.into_iter().map(|row| row.title).collect(),
            )
        })
        .collect()
}

#[test]
fn seeded_list_shows_demo_contacts() {
    let service = seeded();
    assert_eq!(
        titles(&service),
        vec![
            (
                "CEO".to_string(),
                vec!["Diana".to_string(), "Maks".to_string()]
            ),
            ("Peasants".to_string(), vec!["Some".to_string()]),
        ]
    );
    let rows = service.rows();
    assert_eq!(rows[0].section, ContactSection::Primary);
    assert_eq!(rows[0].rows[0].leading_icon, Some("person.fill"));
    assert_eq!(rows[0].rows[0].trailing_icon, Some("star"));
}

#[test]
fn first_seed_inserts_everything() {
    let mut service = ContactListService::new(ReconcilerConfig::default());
    let script = service.seed().unwrap();
    let summary = script.summary();
    assert_eq!(summary.section_inserts, 2);
    assert_eq!(summary.inserts, 3);
    assert_eq!(script.len(), 5);
}

#[test]
fn seeding_twice_is_rejected() {
    let mut service = seeded();
    let err = service.seed().unwrap_err();
    assert!(matches!(
        err,
        ContactServiceError::Snapshot(SnapshotError::DuplicateSection(_))
    ));
    assert_eq!(service.snapshot().number_of_items(), 3);
}

#[test]
fn add_contact_appends_to_chosen_section() {
    let mut service = seeded();
    let (id, script) = service
        .add_contact(AddContactForm::new("  Lena ", ContactSection::Secondary))
        .unwrap();

    assert_eq!(script.len(), 1);
    match &script.ops()[0] {
        EditOp::InsertItem { id: inserted, to, payload } => {
            assert_eq!(*inserted, id);
            assert_eq!(*to, Position::new(1, 1));
            assert_eq!(payload.name, "Lena");
        }
        other => panic!("unexpected op {other:?}"),
    }
    assert_eq!(service.reconciler().position(&id), Some(Position::new(1, 1)));
}

#[test]
fn add_contact_rejects_blank_names() {
    let mut service = seeded();
    let err = service
        .add_contact(AddContactForm::new("   ", ContactSection::Primary))
        .unwrap_err();
    assert_eq!(err, ContactServiceError::InvalidName);
    assert_eq!(service.reconciler().generation(), 1);
}

#[test]
fn duplicate_names_are_distinct_rows() {
    let mut service = seeded();
    let (first, _) = service
        .add_contact(AddContactForm::new("Diana", ContactSection::Primary))
        .unwrap();
    assert_ne!(
        service.reconciler().identity(Position::new(0, 0)),
        Some(&first)
    );
    assert_eq!(
        titles(&service)[0].1,
        vec!["Diana".to_string(), "Maks".to_string(), "Diana".to_string()]
    );
}

#[test]
fn identical_payloads_stay_separate_rows() {
    let mut service = seeded();
    let (first, _) = service
        .add_contact(AddContactForm::new("Lena", ContactSection::Secondary))
        .unwrap();
    let (second, _) = service
        .add_contact(AddContactForm::new("Lena", ContactSection::Secondary))
        .unwrap();
    assert_ne!(first, second);
    assert_eq!(
        service.contact_at(Position::new(1, 1)),
        service.contact_at(Position::new(1, 2))
    );

    let script = service.toggle_favourite_at(Position::new(1, 2)).unwrap();
    assert_eq!(script.reloaded_items(), vec![&second]);
    assert!(!service.contact_at(Position::new(1, 1)).unwrap().is_favourite);
    assert!(service.contact_at(Position::new(1, 2)).unwrap().is_favourite);

    let script = service.delete_at(Position::new(1, 1)).unwrap();
    assert_eq!(script.deleted_items(), vec![&first]);
    assert_eq!(service.reconciler().position(&second), Some(Position::new(1, 1)));
}

#[test]
fn delete_at_removes_one_row_without_moves() {
    let mut service = seeded();
    let removed = *service.reconciler().identity(Position::new(0, 0)).unwrap();
    let script = service.delete_at(Position::new(0, 0)).unwrap();

    assert_eq!(
        script.ops(),
        &[EditOp::DeleteItem {
            id: removed,
            from: Position::new(0, 0),
        }]
    );
    assert_eq!(
        service.contact_at(Position::new(0, 0)).unwrap().name,
        "Maks"
    );
    assert_eq!(service.reconciler().position(&removed), None);
}

#[test]
fn toggle_favourite_reloads_the_row() {
    let mut service = seeded();
    let at = Position::new(1, 0);
    let script = service.toggle_favourite_at(at).unwrap();

    assert_eq!(script.len(), 1);
    match &script.ops()[0] {
        EditOp::ReloadItem { at: reloaded, payload, .. } => {
            assert_eq!(*reloaded, at);
            assert!(payload.is_favourite);
        }
        other => panic!("unexpected op {other:?}"),
    }
    assert_eq!(service.rows()[1].rows[0].trailing_icon, Some("star.fill"));

    service.toggle_favourite_at(at).unwrap();
    assert!(!service.contact_at(at).unwrap().is_favourite);
}

#[test]
fn missing_position_is_reported() {
    let mut service = seeded();
    let missing = Position::new(1, 5);
    assert_eq!(
        service.delete_at(missing).unwrap_err(),
        ContactServiceError::PositionNotFound(missing)
    );
    assert_eq!(
        service.toggle_favourite_at(Position::new(4, 0)).unwrap_err(),
        ContactServiceError::PositionNotFound(Position::new(4, 0))
    );
}

#[test]
fn unseeded_list_rejects_add() {
    let mut service = ContactListService::new(ReconcilerConfig::default());
    let err = service
        .add_contact(AddContactForm::new("Lena", ContactSection::Primary))
        .unwrap_err();
    assert!(matches!(
        err,
        ContactServiceError::Snapshot(SnapshotError::UnknownSection(_))
    ));
    assert!(service.rows().is_empty());
}
