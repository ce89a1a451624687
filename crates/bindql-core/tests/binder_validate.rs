//! Tests for binding annotations to supplied types.

mod common;
use common::*;

use std::collections::BTreeSet;

use bindql_core::BindError;

const STATEMENT: &str = "SELECT * AS &Person.* FROM person WHERE address_id = $Address.id;";

#[test]
fn all_named_types_supplied() {
    assert_eq!(bind(STATEMENT, &["Person", "Address"]), Ok(()));
}

#[test]
fn unresolved_type_is_named() {
    let err = bind(STATEMENT, &["Person"]).unwrap_err();
    assert_eq!(err, BindError::TypeInfoNotPresent("Address".into()));
    assert_eq!(err.type_name(), "Address");
}

#[test]
fn unused_type_is_named() {
    let err = bind(STATEMENT, &["Person", "Address", "Extra"]).unwrap_err();
    assert_eq!(err, BindError::SuperfluousType("Extra".into()));
}

#[test]
fn first_unused_type_in_supply_order() {
    let err = bind("SELECT &Person.* FROM person", &["Zeta", "Person", "Alpha"]).unwrap_err();
    assert_eq!(err, BindError::SuperfluousType("Zeta".into()));
}

#[test]
fn statement_without_annotations_needs_no_types() {
    assert_eq!(bind("SELECT name FROM person", &[]), Ok(()));
}

#[test]
fn every_reference_must_resolve() {
    let sql = "SELECT (&Person.name, &Manager.name) FROM person, manager WHERE p.id = $Address.id";
    assert_eq!(bind(sql, &["Person", "Manager", "Address"]), Ok(()));
    assert_eq!(
        bind(sql, &["Person", "Address"]),
        Err(BindError::TypeInfoNotPresent("Manager".into()))
    );
}

#[test]
fn validate_succeeds_exactly_when_name_sets_match() {
    let statements = [
        "SELECT &Person.* FROM person",
        "SELECT &Person.*, &Address.* FROM person JOIN address",
        "SELECT &Person.* FROM person WHERE id = $Manager.id",
        "SELECT 1",
    ];
    let supplies: [&[&str]; 5] = [
        &[],
        &["Person"],
        &["Person", "Address"],
        &["Manager", "Person"],
        &["Address"],
    ];

    for sql in statements {
        let named: BTreeSet<String> = parse(sql)
            .type_mappings()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        for names in supplies {
            let supplied: BTreeSet<String> = names.iter().map(ToString::to_string).collect();
            assert_eq!(
                bind(sql, names).is_ok(),
                named == supplied,
                "statement {sql:?} with {names:?}"
            );
        }
    }
}
