//! Keyed-list correlation.
//!
//! Aligns the elements of two sequences by a key extracted from each
//! element. Keys must be unique within each side; the matched pairs follow
//! the left side's order and each side's unmatched elements keep their
//! original relative order.

use crate::address::FieldAddress;
use crate::errors::{RecordKitError, Result};
use crate::reflect::{Record, Value};

/// Which side of a correlation an element came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationSide {
    Left,
    Right,
}

impl CorrelationSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationSide::Left => "left",
            CorrelationSide::Right => "right",
        }
    }
}

/// Outcome of correlating two sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation<T> {
    /// Pairs sharing a key, in the left side's order.
    pub matched: Vec<(T, T)>,
    pub left_unmatched: Vec<T>,
    pub right_unmatched: Vec<T>,
}

impl<T> Correlation<T> {
    /// Realign both sides so that matched elements share an index: matched
    /// pairs first, then each side's unmatched elements.
    pub fn into_aligned(self) -> (Vec<T>, Vec<T>) {
        let mut left = Vec::with_capacity(self.matched.len() + self.left_unmatched.len());
        let mut right = Vec::with_capacity(self.matched.len() + self.right_unmatched.len());
        for (l, r) in self.matched {
            left.push(l);
            right.push(r);
        }
        left.extend(self.left_unmatched);
        right.extend(self.right_unmatched);
        (left, right)
    }
}

/// Remove, pairwise, every element present on both sides.
///
/// Each occurrence on the left cancels at most one equal occurrence on the
/// right; the surviving elements keep their order.
pub fn cancel_common<T: PartialEq>(left: &mut Vec<T>, right: &mut Vec<T>) {
    let mut i = 0;
    while i < left.len() {
        match right.iter().position(|r| *r == left[i]) {
            Some(j) => {
                left.remove(i);
                right.remove(j);
            }
            None => i += 1,
        }
    }
}

/// Value of the field of `record` whose canonical address is `key`.
///
/// Unset singular fields and records without such a field yield `None`.
pub fn extract_key(record: &Record, key: &FieldAddress) -> Option<Value> {
    record
        .descriptor()
        .fields()
        .iter()
        .find(|f| key.matches(f))
        .and_then(|f| record.get_field(f))
}

/// Pair up the elements of `left` and `right` by the key `key_of` extracts.
///
/// # Errors
///
/// Returns `NonUniqueCorrelationKey` if two elements on the same side share
/// a key. An absent key counts as a key value of its own.
pub fn correlate<T, K, F>(
    left: Vec<T>,
    right: Vec<T>,
    key_of: F,
    field: &FieldAddress,
    key_field: &FieldAddress,
) -> Result<Correlation<T>>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    let left_keys: Vec<K> = left.iter().map(&key_of).collect();
    let right_keys: Vec<K> = right.iter().map(&key_of).collect();
    ensure_unique(&left_keys, CorrelationSide::Left, field, key_field)?;
    ensure_unique(&right_keys, CorrelationSide::Right, field, key_field)?;

    let mut right_slots: Vec<Option<T>> = right.into_iter().map(Some).collect();
    let mut matched = Vec::new();
    let mut left_unmatched = Vec::new();
    for (item, key) in left.into_iter().zip(&left_keys) {
        let partner = right_keys
            .iter()
            .position(|k| k == key)
            .and_then(|j| right_slots[j].take());
        match partner {
            Some(other) => matched.push((item, other)),
            None => left_unmatched.push(item),
        }
    }
    let right_unmatched: Vec<T> = right_slots.into_iter().flatten().collect();

    tracing::debug!(
        field = %field,
        key_field = %key_field,
        matched_len = matched.len(),
        left_unmatched_len = left_unmatched.len(),
        right_unmatched_len = right_unmatched.len(),
        "Correlated repeated field"
    );

    Ok(Correlation {
        matched,
        left_unmatched,
        right_unmatched,
    })
}

fn ensure_unique<K: PartialEq>(
    keys: &[K],
    side: CorrelationSide,
    field: &FieldAddress,
    key_field: &FieldAddress,
) -> Result<()> {
    for (i, key) in keys.iter().enumerate() {
        if keys[i + 1..].contains(key) {
            return Err(RecordKitError::NonUniqueCorrelationKey {
                field: field.to_string(),
                key_field: key_field.to_string(),
                side: side.as_str().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{MessageDescriptor, ScalarType};

    fn addr() -> (FieldAddress, FieldAddress) {
        (
            FieldAddress::new("Member", "borrow_history"),
            FieldAddress::new("Book", "book_id"),
        )
    }

    #[test]
    fn test_cancel_common_is_pairwise() {
        let mut left = vec!["a", "b", "b", "c"];
        let mut right = vec!["b", "d", "a"];
        cancel_common(&mut left, &mut right);
        assert_eq!(left, vec!["b", "c"]);
        assert_eq!(right, vec!["d"]);
    }

    #[test]
    fn test_matched_follow_left_order_and_unmatched_keep_theirs() {
        let (field, key) = addr();
        let left = vec![(3, "l3"), (1, "l1"), (7, "l7")];
        let right = vec![(9, "r9"), (1, "r1"), (3, "r3"), (4, "r4")];
        let corr = correlate(left, right, |e| e.0, &field, &key).unwrap();

        assert_eq!(
            corr.matched,
            vec![((3, "l3"), (3, "r3")), ((1, "l1"), (1, "r1"))]
        );
        assert_eq!(corr.left_unmatched, vec![(7, "l7")]);
        assert_eq!(corr.right_unmatched, vec![(9, "r9"), (4, "r4")]);

        let (l, r) = corr.into_aligned();
        assert_eq!(l.iter().map(|e| e.1).collect::<Vec<_>>(), ["l3", "l1", "l7"]);
        assert_eq!(r.iter().map(|e| e.1).collect::<Vec<_>>(), ["r3", "r1", "r9", "r4"]);
    }

    #[test]
    fn test_duplicate_keys_fail_per_side() {
        let (field, key) = addr();
        let err = correlate(vec![1, 2], vec![5, 5], |e| *e, &field, &key).unwrap_err();
        assert_eq!(
            err,
            RecordKitError::NonUniqueCorrelationKey {
                field: "Member.borrow_history".to_string(),
                key_field: "Book.book_id".to_string(),
                side: "right".to_string(),
            }
        );

        let err = correlate(vec![Some(1), None, None], vec![], |e| *e, &field, &key).unwrap_err();
        assert!(matches!(
            err,
            RecordKitError::NonUniqueCorrelationKey { ref side, .. } if side == "left"
        ));
    }

    #[test]
    fn test_extract_key_by_canonical_address() {
        let desc = MessageDescriptor::builder("library.Book")
            .scalar("book_id", ScalarType::I32)
            .scalar("title", ScalarType::String)
            .build();
        let book = Record::new(desc.clone()).with("book_id", 7).unwrap();
        let (_, key) = addr();
        assert_eq!(extract_key(&book, &key), Some(Value::I32(7)));
        assert_eq!(
            extract_key(&book, &FieldAddress::new("Book", "title")),
            None
        );
        assert_eq!(
            extract_key(&book, &FieldAddress::new("Member", "book_id")),
            None
        );
    }
}
