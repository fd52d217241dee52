//! Structural merge.
//!
//! Converges two records of the same type into each other: every field that
//! differs is reconciled by filling gaps, by a configured [`Resolver`], or
//! by recursive merging of nested and keyed repeated records. Both inputs
//! are cloned; the caller's records are never modified.

use crate::address::FieldAddress;
use crate::correlate::{cancel_common, correlate, extract_key};
use crate::errors::{RecordKitError, Result};
use crate::options::{MergeOptions, Resolver};
use crate::reflect::{FieldDescriptor, Record, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use recordkit_core_types::schema::OP_MERGE;
use std::cmp::Ordering;

/// Merge `first` and `second` into each other and return both results.
///
/// `None` options merge with the no-op configuration: gaps are filled,
/// conflicting singular values are left as they are and repeated fields
/// populated on both sides are left untouched.
///
/// # Errors
///
/// - `TypeMismatch` if the records are of different types
/// - `MissingMergeKey` if a merged repeated message field has no key field
/// - `NonUniqueCorrelationKey` if merge keys repeat within one side
/// - `UnsupportedResolver` if `GREATER`/`LESSER` meets a message field or a
///   value present on only one side
pub fn merge(
    first: &Record,
    second: &Record,
    options: Option<&MergeOptions>,
) -> Result<(Record, Record)> {
    let type_name = first.full_name();
    log_op_start!(OP_MERGE, type_name);
    let start = std::time::Instant::now();

    let default_options;
    let options = match options {
        Some(options) => options,
        None => {
            default_options = MergeOptions::default();
            &default_options
        }
    };

    let mut alpha = first.clone();
    let mut beta = second.clone();
    merge_records(&mut alpha, &mut beta, options).map_err(|e| {
        log_op_error!(OP_MERGE, type_name, start, &e);
        e
    })?;

    let converged = alpha == beta;
    log_op_end!(OP_MERGE, type_name, start, converged = converged);

    Ok((alpha, beta))
}

fn merge_records(alpha: &mut Record, beta: &mut Record, options: &MergeOptions) -> Result<()> {
    if alpha == beta {
        return Ok(());
    }
    if alpha.full_name() != beta.full_name() {
        return Err(RecordKitError::TypeMismatch {
            left: alpha.full_name().to_string(),
            right: beta.full_name().to_string(),
        });
    }

    let descriptor = alpha.descriptor().clone();
    for field in descriptor.fields() {
        let address = FieldAddress::of(field);
        let a = alpha.get_field(field);
        let b = beta.get_field(field);
        if a == b || options.is_excluded(&address) {
            continue;
        }
        if field.is_repeated() {
            let a = a.map(Value::into_list).unwrap_or_default();
            let b = b.map(Value::into_list).unwrap_or_default();
            merge_repeated(field, &address, alpha, beta, a, b, options)?;
        } else {
            merge_single(field, &address, alpha, beta, a, b, options)?;
        }
    }
    Ok(())
}

fn merge_repeated(
    field: &FieldDescriptor,
    address: &FieldAddress,
    alpha: &mut Record,
    beta: &mut Record,
    a: Vec<Value>,
    b: Vec<Value>,
    options: &MergeOptions,
) -> Result<()> {
    if a.is_empty() {
        return alpha.set_field(field, Value::List(b));
    }
    if b.is_empty() {
        return beta.set_field(field, Value::List(a));
    }
    if !options.is_merged(address) {
        tracing::trace!(field = %address, "Repeated field not configured for merge");
        return Ok(());
    }

    if !field.is_message() {
        let mut a_extra = a.clone();
        let mut b_extra = b.clone();
        cancel_common(&mut a_extra, &mut b_extra);
        let mut merged_a = a;
        merged_a.extend(b_extra);
        let mut merged_b = b;
        merged_b.extend(a_extra);
        alpha.set_field(field, Value::List(merged_a))?;
        return beta.set_field(field, Value::List(merged_b));
    }

    let key = options
        .merge_key(address)
        .ok_or_else(|| RecordKitError::MissingMergeKey {
            field: address.to_string(),
        })?;
    let a = into_records(field, a)?;
    let b = into_records(field, b)?;
    let correlation = correlate(a, b, |r| extract_key(r, key), address, key)?;

    let capacity = correlation.matched.len()
        + correlation.left_unmatched.len()
        + correlation.right_unmatched.len();
    let mut merged_a = Vec::with_capacity(capacity);
    let mut merged_b = Vec::with_capacity(capacity);
    for (mut x, mut y) in correlation.matched {
        merge_records(&mut x, &mut y, options)?;
        merged_a.push(Value::Message(x));
        merged_b.push(Value::Message(y));
    }
    for unmatched in correlation
        .left_unmatched
        .into_iter()
        .chain(correlation.right_unmatched)
    {
        merged_a.push(Value::Message(unmatched.clone()));
        merged_b.push(Value::Message(unmatched));
    }
    alpha.set_field(field, Value::List(merged_a))?;
    beta.set_field(field, Value::List(merged_b))
}

fn merge_single(
    field: &FieldDescriptor,
    address: &FieldAddress,
    alpha: &mut Record,
    beta: &mut Record,
    a: Option<Value>,
    b: Option<Value>,
    options: &MergeOptions,
) -> Result<()> {
    let resolver = options.resolver(address);
    match (a, b) {
        (Some(Value::Message(mut x)), Some(Value::Message(mut y))) => {
            merge_records(&mut x, &mut y, options)?;
            alpha.set_field(field, Value::Message(x))?;
            beta.set_field(field, Value::Message(y))
        }
        (Some(x), Some(y)) => {
            let Some(resolver) = resolver else {
                tracing::debug!(field = %address, "Conflict left unresolved");
                return Ok(());
            };
            tracing::debug!(field = %address, resolver = %resolver, "Resolving conflict");
            match resolver {
                Resolver::Greater | Resolver::Lesser => {
                    let (smaller, larger) = match x.compare(&y) {
                        Ordering::Greater => (y, x),
                        _ => (x, y),
                    };
                    let chosen = if resolver == Resolver::Greater {
                        larger
                    } else {
                        smaller
                    };
                    alpha.set_field(field, chosen.clone())?;
                    beta.set_field(field, chosen)
                }
                Resolver::First => beta.set_field(field, x),
                Resolver::Second => alpha.set_field(field, y),
                Resolver::Default => {
                    alpha.clear_field(field);
                    beta.clear_field(field);
                    Ok(())
                }
            }
        }
        (a, b) => match resolver {
            None => match (a, b) {
                (Some(x), None) => beta.set_field(field, x),
                (None, Some(y)) => alpha.set_field(field, y),
                _ => Ok(()),
            },
            Some(resolver @ (Resolver::Greater | Resolver::Lesser)) => {
                let reason = if field.is_message() {
                    "ordering is undefined for message values"
                } else {
                    "one of the values is absent"
                };
                Err(RecordKitError::UnsupportedResolver {
                    resolver: resolver.to_string(),
                    field: address.to_string(),
                    reason: reason.to_string(),
                })
            }
            Some(Resolver::First) => match a {
                Some(x) => beta.set_field(field, x),
                None => {
                    beta.clear_field(field);
                    Ok(())
                }
            },
            Some(Resolver::Second) => match b {
                Some(y) => alpha.set_field(field, y),
                None => {
                    alpha.clear_field(field);
                    Ok(())
                }
            },
            Some(Resolver::Default) => {
                alpha.clear_field(field);
                beta.clear_field(field);
                Ok(())
            }
        },
    }
}

fn into_records(field: &FieldDescriptor, items: Vec<Value>) -> Result<Vec<Record>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Message(record) => Ok(record),
            other => Err(RecordKitError::InvalidFieldValue {
                field: field.full_name().to_string(),
                expected: field.kind().to_string(),
                found: other.kind_name().to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{MessageDescriptor, ScalarType};
    use std::sync::Arc;

    fn counter() -> Arc<MessageDescriptor> {
        MessageDescriptor::builder("stats.Counter")
            .scalar("name", ScalarType::String)
            .scalar("count", ScalarType::I32)
            .repeated_scalar("tags", ScalarType::String)
            .build()
    }

    fn with_count(count: i32) -> Record {
        Record::new(counter()).with("count", count).unwrap()
    }

    #[test]
    fn test_fill_gap_without_resolver() {
        let a = Record::new(counter()).with("name", "hits").unwrap();
        let b = with_count(3);
        let (x, y) = merge(&a, &b, None).unwrap();
        assert_eq!(x, y);
        assert_eq!(x.get("name").unwrap(), Some(Value::from("hits")));
        assert_eq!(x.get("count").unwrap(), Some(Value::I32(3)));
    }

    #[test]
    fn test_unresolved_conflict_is_kept() {
        let (x, y) = merge(&with_count(5), &with_count(10), None).unwrap();
        assert_eq!(x.get("count").unwrap(), Some(Value::I32(5)));
        assert_eq!(y.get("count").unwrap(), Some(Value::I32(10)));
    }

    #[test]
    fn test_primitive_repeated_union() {
        let tags = |items: &[&str]| {
            Value::List(items.iter().map(|s| Value::from(*s)).collect())
        };
        let a = Record::new(counter()).with("tags", tags(&["a", "b"])).unwrap();
        let b = Record::new(counter()).with("tags", tags(&["b", "c", "d"])).unwrap();
        let options = MergeOptions::builder()
            .merge_repeated("Counter.tags")
            .build()
            .unwrap();

        let (x, y) = merge(&a, &b, Some(&options)).unwrap();
        assert_eq!(x.get("tags").unwrap(), Some(tags(&["a", "b", "c", "d"])));
        assert_eq!(y.get("tags").unwrap(), Some(tags(&["b", "c", "d", "a"])));

        let (x, y) = merge(&a, &b, None).unwrap();
        assert_eq!(x, a);
        assert_eq!(y, b);
    }

    #[test]
    fn test_ordering_resolver_with_absent_side_fails() {
        let options = MergeOptions::builder()
            .resolver("Counter.count", Resolver::Greater)
            .build()
            .unwrap();
        let err = merge(&with_count(1), &Record::new(counter()), Some(&options)).unwrap_err();
        assert!(matches!(err, RecordKitError::UnsupportedResolver { .. }));
    }
}
