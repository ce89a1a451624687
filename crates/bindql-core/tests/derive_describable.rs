//! Tests for the `#[derive(Describable)]` macro output.

use bindql_core::{Describable, Descriptor, FieldTag, Preparer};
use bindql_derive::Describable;

// =============================================================================
// Test: Struct with default type and column names
// =============================================================================

#[allow(dead_code)]
#[derive(Debug, Describable)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub address_id: i64,
}

#[test]
fn test_person_type_name() {
    assert_eq!(Person::TYPE_NAME, "Person");
}

#[test]
fn test_person_fields() {
    assert_eq!(
        Person::FIELDS,
        &[
            FieldTag::new("id"),
            FieldTag::new("name"),
            FieldTag::new("address_id"),
        ]
    );
}

// =============================================================================
// Test: Renamed type and columns, omitted and skipped fields
// =============================================================================

#[allow(dead_code)]
#[derive(Describable)]
#[describe(name = "Address")]
pub struct AddressRow {
    #[column(name = "id")]
    pub address_id: i64,
    #[column(omit_empty)]
    pub district: String,
    #[column(name = "street", omit_empty)]
    pub street_name: String,
    #[column(skip)]
    pub cached_label: String,
    #[column]
    pub r#type: String,
}

#[test]
fn test_renamed_type() {
    assert_eq!(AddressRow::TYPE_NAME, "Address");
}

#[test]
fn test_column_options() {
    assert_eq!(
        AddressRow::FIELDS,
        &[
            FieldTag {
                column: "id",
                field: "address_id",
                omit_empty: false,
            },
            FieldTag {
                column: "district",
                field: "district",
                omit_empty: true,
            },
            FieldTag {
                column: "street",
                field: "street_name",
                omit_empty: true,
            },
            FieldTag::new("type"),
        ]
    );
}

#[test]
fn test_descriptor_from_derive() {
    let descriptor = Descriptor::of::<AddressRow>().unwrap();
    assert_eq!(descriptor.name(), "Address");
    assert_eq!(
        descriptor.field_names().collect::<Vec<_>>(),
        ["id", "district", "street", "type"]
    );
    assert!(!descriptor.has_field("cached_label"));
    assert_eq!(descriptor.field("street").unwrap().field, "street_name");
}

// =============================================================================
// Test: Generic struct and a struct without columns
// =============================================================================

#[allow(dead_code)]
#[derive(Describable)]
pub struct Wrapper<T: 'static> {
    pub value: T,
}

#[allow(dead_code)]
#[derive(Describable)]
pub struct Marker {
    #[column(skip)]
    pub ignored: bool,
}

#[test]
fn test_generic_struct() {
    assert_eq!(Wrapper::<i32>::TYPE_NAME, "Wrapper");
    assert_eq!(Wrapper::<String>::FIELDS, &[FieldTag::new("value")]);
}

#[test]
fn test_struct_without_columns() {
    assert!(Marker::FIELDS.is_empty());
}

// =============================================================================
// Test: Derived types in a prepared statement
// =============================================================================

#[test]
fn test_prepare_with_derived_types() {
    let person = Person {
        id: 1,
        name: "Fred".into(),
        address_id: 7,
    };
    let address = AddressRow {
        address_id: 7,
        district: String::new(),
        street_name: String::new(),
        cached_label: String::new(),
        r#type: String::new(),
    };

    let stmt = Preparer::default()
        .prepare(
            "SELECT p.* AS &Person.*, a.district AS &Address.district \
             FROM person AS p JOIN address AS a ON p.address_id = a.id \
             WHERE a.id = $Address.id",
            &[&person, &address],
        )
        .unwrap();

    assert_eq!(stmt.type_names().collect::<Vec<_>>(), ["Person", "Address"]);
    assert_eq!(stmt.outputs().len(), 2);
    assert_eq!(stmt.inputs().len(), 1);
}
