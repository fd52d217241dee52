//! Structural simplify scenarios over the library schema.

mod common;

use common::{address, book, member, reading, records, status, strings};
use recordkit_core::{simplify, Record, SimplifyOptions, UnknownValue, Value};

fn get(record: &Record, field: &str) -> Option<Value> {
    record.get(field).unwrap()
}

#[test]
fn test_default_scalars_and_enums_are_cleared() {
    let record = book(0)
        .with("title", "")
        .unwrap()
        .with("copies", 0)
        .unwrap()
        .with("status", status("AVAILABLE"))
        .unwrap();

    let simplified = simplify(&record, None).unwrap();

    assert!(simplified.is_default());
}

#[test]
fn test_non_default_values_survive() {
    let record = book(3)
        .with("title", "Dune")
        .unwrap()
        .with("status", status("BORROWED"))
        .unwrap();

    let simplified = simplify(&record, None).unwrap();

    assert_eq!(simplified, record);
}

#[test]
fn test_unknown_fields_are_removed_recursively() {
    let mut nested = address().with("city", "Oslo").unwrap();
    nested
        .unknown_fields_mut()
        .add(17, UnknownValue::LengthDelimited(b"legacy".to_vec()));
    let mut record = member().with("address", nested).unwrap();
    record.unknown_fields_mut().add(30, UnknownValue::Fixed64(9));

    let simplified = simplify(&record, None).unwrap();

    assert!(simplified.unknown_fields().is_empty());
    match get(&simplified, "address") {
        Some(Value::Message(address)) => {
            assert!(address.unknown_fields().is_empty());
            assert_eq!(address.get("city").unwrap(), Some(Value::from("Oslo")));
        }
        other => panic!("address should survive, got {other:?}"),
    }
}

#[test]
fn test_all_default_nested_record_is_cleared() {
    let record = member()
        .with("name", "Ann")
        .unwrap()
        .with("address", address().with("city", "").unwrap())
        .unwrap();

    let simplified = simplify(&record, None).unwrap();

    assert_eq!(get(&simplified, "address"), None);
    assert_eq!(get(&simplified, "name"), Some(Value::from("Ann")));
}

#[test]
fn test_dropped_fields_are_cleared_at_every_level() {
    let record = member()
        .with("name", "Ann")
        .unwrap()
        .with("email", "ann@example.org")
        .unwrap()
        .with(
            "address",
            address()
                .with("city", "Oslo")
                .unwrap()
                .with("country", "NO")
                .unwrap(),
        )
        .unwrap();
    let options = SimplifyOptions::builder()
        .drop_field("Member.email")
        .drop_field("library.Address.country")
        .build()
        .unwrap();

    let simplified = simplify(&record, Some(&options)).unwrap();

    let expected = member()
        .with("name", "Ann")
        .unwrap()
        .with("address", address().with("city", "Oslo").unwrap())
        .unwrap();
    assert_eq!(simplified, expected);
}

#[test]
fn test_dropping_only_content_clears_nested_record() {
    let record = member()
        .with("address", address().with("country", "NO").unwrap())
        .unwrap();
    let options = SimplifyOptions::builder()
        .drop_field("Address.country")
        .build()
        .unwrap();

    assert!(simplify(&record, Some(&options)).unwrap().is_default());
}

#[test]
fn test_repeated_elements_collapse_but_are_kept() {
    let record = member()
        .with(
            "borrow_history",
            records(vec![book(0).with("copies", 0).unwrap(), book(5)]),
        )
        .unwrap();

    let simplified = simplify(&record, None).unwrap();

    let expected = member()
        .with(
            "borrow_history",
            records(vec![Record::new(book(0).descriptor().clone()), book(5)]),
        )
        .unwrap();
    assert_eq!(simplified, expected);
}

#[test]
fn test_repeated_primitives_are_untouched() {
    let record = member()
        .with("favorite_genres", strings(&["", "poetry", ""]))
        .unwrap();

    let simplified = simplify(&record, None).unwrap();

    assert_eq!(
        get(&simplified, "favorite_genres"),
        Some(strings(&["", "poetry", ""]))
    );
}

#[test]
fn test_simplify_does_not_modify_input() {
    let record = book(0);
    let _ = simplify(&record, None).unwrap();
    assert_eq!(get(&record, "book_id"), Some(Value::I32(0)));
}

#[test]
fn test_negative_zero_survives_simplify() {
    let record = reading()
        .with("v", -0.0f64)
        .unwrap()
        .with("w", 0.0f32)
        .unwrap();

    let simplified = simplify(&record, None).unwrap();

    assert_eq!(get(&simplified, "v"), Some(Value::F64(-0.0)));
    assert_eq!(get(&simplified, "w"), None);
}
