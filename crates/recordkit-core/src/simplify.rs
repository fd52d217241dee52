//! Structural simplification.
//!
//! Normalizes a record by clearing its unknown fields, the fields named in
//! the drop set, and every scalar or enum field holding its default value.
//! Nested records are simplified recursively and cleared once nothing but
//! defaults remains. Elements of repeated fields are never removed; only
//! their content collapses toward the default.

use crate::address::FieldAddress;
use crate::errors::Result;
use crate::options::SimplifyOptions;
use crate::reflect::{Record, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use recordkit_core_types::schema::OP_SIMPLIFY;

/// Return a simplified copy of `record`.
///
/// # Errors
///
/// Only fails with `InvalidFieldValue` if the record holds a value that does
/// not fit its own schema, which records built through
/// [`Record::set_field`] never do.
pub fn simplify(record: &Record, options: Option<&SimplifyOptions>) -> Result<Record> {
    let type_name = record.full_name();
    log_op_start!(OP_SIMPLIFY, type_name);
    let start = std::time::Instant::now();

    let default_options;
    let options = match options {
        Some(options) => options,
        None => {
            default_options = SimplifyOptions::default();
            &default_options
        }
    };

    let mut simplified = record.clone();
    simplify_record(&mut simplified, options).map_err(|e| {
        log_op_error!(OP_SIMPLIFY, type_name, start, &e);
        e
    })?;

    let is_default = simplified.is_default();
    log_op_end!(OP_SIMPLIFY, type_name, start, is_default = is_default);

    Ok(simplified)
}

fn simplify_record(record: &mut Record, options: &SimplifyOptions) -> Result<()> {
    if !record.unknown_fields().is_empty() {
        record.clear_unknown_fields();
    }

    let descriptor = record.descriptor().clone();
    for field in descriptor.fields() {
        if options.is_dropped(&FieldAddress::of(field)) {
            record.clear_field(field);
            continue;
        }
        let Some(value) = record.get_field(field) else {
            continue;
        };

        if field.is_repeated() {
            // repeated primitives are left as they are
            if field.is_message() {
                let items = value
                    .into_list()
                    .into_iter()
                    .map(|item| simplify_element(item, options))
                    .collect::<Result<Vec<_>>>()?;
                record.set_field(field, Value::List(items))?;
            }
            continue;
        }

        match value {
            Value::Message(mut nested) => {
                simplify_record(&mut nested, options)?;
                if nested.is_default() {
                    record.clear_field(field);
                } else {
                    record.set_field(field, Value::Message(nested))?;
                }
            }
            scalar => {
                if field.default_value().as_ref() == Some(&scalar) {
                    record.clear_field(field);
                }
            }
        }
    }
    Ok(())
}

fn simplify_element(item: Value, options: &SimplifyOptions) -> Result<Value> {
    match item {
        Value::Message(mut nested) => {
            simplify_record(&mut nested, options)?;
            if nested.is_default() {
                Ok(Value::Message(Record::new(nested.descriptor().clone())))
            } else {
                Ok(Value::Message(nested))
            }
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{MessageDescriptor, ScalarType, UnknownValue};
    use std::sync::Arc;

    fn setting() -> Arc<MessageDescriptor> {
        MessageDescriptor::builder("cfg.Setting")
            .scalar("key", ScalarType::String)
            .scalar("enabled", ScalarType::Bool)
            .scalar_with_default("retries", ScalarType::U32, Value::U32(3))
            .build()
    }

    #[test]
    fn test_defaults_are_cleared() {
        let record = Record::new(setting())
            .with("key", "")
            .unwrap()
            .with("enabled", false)
            .unwrap()
            .with("retries", 3u32)
            .unwrap();
        assert!(simplify(&record, None).unwrap().is_default());
    }

    #[test]
    fn test_non_defaults_survive_and_unknown_fields_go() {
        let mut record = Record::new(setting())
            .with("enabled", true)
            .unwrap()
            .with("retries", 0u32)
            .unwrap();
        record.unknown_fields_mut().add(99, UnknownValue::Varint(1));

        let simplified = simplify(&record, None).unwrap();
        assert!(simplified.unknown_fields().is_empty());
        assert_eq!(simplified.get("enabled").unwrap(), Some(Value::Bool(true)));
        assert_eq!(simplified.get("retries").unwrap(), Some(Value::U32(0)));
    }
}
