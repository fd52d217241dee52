//! Library-management schema shared by the integration tests.

#![allow(dead_code)]

use recordkit_core::{EnumDescriptor, EnumValue, MessageDescriptor, Record, ScalarType, Value};
use std::sync::{Arc, OnceLock};

pub struct Library {
    pub status: Arc<EnumDescriptor>,
    pub address: Arc<MessageDescriptor>,
    pub address_old: Arc<MessageDescriptor>,
    pub book: Arc<MessageDescriptor>,
    pub member: Arc<MessageDescriptor>,
    pub reading: Arc<MessageDescriptor>,
}

/// Descriptors of the `library` package, built once per test binary.
pub fn library() -> &'static Library {
    static LIBRARY: OnceLock<Library> = OnceLock::new();
    LIBRARY.get_or_init(|| {
        let status = Arc::new(EnumDescriptor::new(
            "library.BookStatus",
            [("AVAILABLE", 0), ("BORROWED", 1), ("RESERVED", 2)],
        ));
        let address = MessageDescriptor::builder("library.Address")
            .scalar("street", ScalarType::String)
            .scalar("city", ScalarType::String)
            .scalar("state", ScalarType::String)
            .scalar("postal_code", ScalarType::String)
            .scalar("country", ScalarType::String)
            .build();
        let address_old = MessageDescriptor::builder("library.AddressOld")
            .scalar("street", ScalarType::String)
            .scalar("city", ScalarType::String)
            .build();
        let book = MessageDescriptor::builder("library.Book")
            .scalar("book_id", ScalarType::I32)
            .scalar("title", ScalarType::String)
            .scalar("author", ScalarType::String)
            .scalar("genre", ScalarType::String)
            .scalar("copies", ScalarType::I32)
            .enumeration("status", &status)
            .repeated_scalar("tags", ScalarType::String)
            .build();
        let member = MessageDescriptor::builder("library.Member")
            .scalar("member_id", ScalarType::I32)
            .scalar("name", ScalarType::String)
            .scalar("email", ScalarType::String)
            .message("address", "library.Address")
            .repeated_message("borrow_history", "library.Book")
            .repeated_scalar("favorite_genres", ScalarType::String)
            .build();
        let reading = MessageDescriptor::builder("lab.Reading")
            .scalar("v", ScalarType::F64)
            .scalar("w", ScalarType::F32)
            .repeated_scalar("samples", ScalarType::F64)
            .build();
        Library {
            reading,
            status,
            address,
            address_old,
            book,
            member,
        }
    })
}

pub fn address() -> Record {
    Record::new(library().address.clone())
}

pub fn address_old() -> Record {
    Record::new(library().address_old.clone())
}

/// A float-valued record, outside the library package.
pub fn reading() -> Record {
    Record::new(library().reading.clone())
}

pub fn floats(items: &[f64]) -> Value {
    Value::List(items.iter().map(|v| Value::F64(*v)).collect())
}

pub fn member() -> Record {
    Record::new(library().member.clone())
}

/// A book with only its id set.
pub fn book(id: i32) -> Record {
    Record::new(library().book.clone())
        .with("book_id", id)
        .unwrap()
}

pub fn status(name: &str) -> Value {
    Value::Enum(library().status.value_by_name(name).unwrap())
}

pub fn strings(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| Value::from(*s)).collect())
}

pub fn records(items: Vec<Record>) -> Value {
    Value::List(items.into_iter().map(Value::Message).collect())
}

pub fn enum_value(name: &str, number: i32) -> EnumValue {
    EnumValue::new(name, number)
}
