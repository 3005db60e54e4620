//! Integration test: an interactive session driving the list controller and
//! the schema together, the way a form coordinator would.

use techform_core::{FieldKey, TechField};
use techform_list::{FormSession, TechDraft, TechList};
use techform_schema::UserSchema;

fn schema() -> UserSchema {
    UserSchema::default()
}

#[test]
fn test_add_fill_submit() {
    let mut session = FormSession::new();
    session.set(&FieldKey::Name, "maria  da silva").unwrap();
    session.set(&FieldKey::Email, "Maria@Example.com").unwrap();
    session.set(&FieldKey::Password, "hunter22").unwrap();

    // One row is not enough.
    let react = session.add_tech();
    session.techs_mut().set_title(react, "React").unwrap();
    session.techs_mut().set_knowledge(react, "80").unwrap();
    let outcome = session.submit(&schema());
    assert_eq!(
        outcome.message(&FieldKey::Techs),
        Some("insert at least 2 technologies")
    );

    let node = session.add_tech();
    session.techs_mut().set_title(node, "Node").unwrap();
    session.techs_mut().set_knowledge(node, "70").unwrap();

    let record = session.submit(&schema()).into_result().unwrap();
    assert_eq!(record.name, "Maria Da Silva");
    assert_eq!(record.email, "maria@example.com");
    assert_eq!(record.password, "hunter22");
    let titles: Vec<&str> = record.techs.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["React", "Node"]);
}

#[test]
fn test_errors_follow_rows_after_removal() {
    let techs = TechList::seeded([
        TechDraft::new("React", "80"),
        TechDraft::new("Elm", "0"),
        TechDraft::new("", "50"),
    ]);
    let mut session = FormSession::with_techs(techs);
    session.set(&FieldKey::Name, "ana").unwrap();
    session.set(&FieldKey::Email, "ana@x.com").unwrap();
    session.set(&FieldKey::Password, "123456").unwrap();

    let untitled = session.techs().ids()[2];
    let elm = session.techs().ids()[1];

    let outcome = session.submit(&schema());
    let errors = outcome.errors().unwrap();
    assert!(errors.contains(&FieldKey::tech(1, TechField::Knowledge)));
    assert!(errors.contains(&FieldKey::tech(2, TechField::Title)));

    // Removing the Elm row moves the untitled row to position 1.
    session.techs_mut().remove(elm).unwrap();
    assert_eq!(
        session.techs().key_for(untitled, TechField::Title).unwrap(),
        FieldKey::tech(1, TechField::Title)
    );

    let outcome = session.submit(&schema());
    let errors = outcome.errors().unwrap();
    assert_eq!(errors.len(), 1);
    let row = session.techs().errors_for(untitled, errors).unwrap();
    assert_eq!(row, [(TechField::Title, "title is required")]);

    session.techs_mut().set_title(untitled, "Rust").unwrap();
    assert!(session.submit(&schema()).is_success());
}

#[test]
fn test_no_upper_bound_on_rows() {
    let mut session = FormSession::new();
    for _ in 0..250 {
        session.add_tech();
    }
    assert_eq!(session.techs().len(), 250);
    assert_eq!(session.techs().snapshot().len(), 250);
}
