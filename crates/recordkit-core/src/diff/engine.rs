//! Recursive record comparator.

use crate::address::FieldAddress;
use crate::correlate::{cancel_common, correlate, extract_key};
use crate::diff::render::{self, Sign};
use crate::errors::{RecordKitError, Result};
use crate::mapper::Side;
use crate::options::DiffOptions;
use crate::reflect::{FieldDescriptor, Record, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use recordkit_core_types::schema::OP_DIFF;
use recordkit_core_types::Redacted;

/// Compare two records of the same type and render every difference.
///
/// Either side may be `None`: a missing left side renders the right side as
/// created (`+`), a missing right side renders the left as deleted (`-`).
/// Equal inputs produce an empty report. `None` options compare with the
/// no-op configuration.
///
/// # Errors
///
/// - `TypeMismatch` if both records are present and of different types
/// - `MissingCorrelationKey` if a correlated repeated message field has no key
/// - `NonUniqueCorrelationKey` if correlation keys repeat within one side
pub fn diff(
    left: Option<&Record>,
    right: Option<&Record>,
    options: Option<&DiffOptions>,
) -> Result<String> {
    let type_name = left.or(right).map(Record::full_name).unwrap_or_default();
    log_op_start!(OP_DIFF, type_name);
    let start = std::time::Instant::now();

    let default_options;
    let options = match options {
        Some(options) => options,
        None => {
            default_options = DiffOptions::default();
            &default_options
        }
    };

    let report = diff_impl(left, right, options).map_err(|e| {
        log_op_error!(OP_DIFF, type_name, start, &e);
        e
    })?;

    let report_len = report.len();
    log_op_end!(OP_DIFF, type_name, start, report_len = report_len);

    Ok(report)
}

fn diff_impl(left: Option<&Record>, right: Option<&Record>, options: &DiffOptions) -> Result<String> {
    if left == right {
        return Ok(String::new());
    }
    if let (Some(l), Some(r)) = (left, right) {
        if l.full_name() != r.full_name() {
            return Err(RecordKitError::TypeMismatch {
                left: l.full_name().to_string(),
                right: r.full_name().to_string(),
            });
        }
    }
    let mut out = String::with_capacity(512);
    Comparer { options }.message(left, right, 0, &mut out)?;
    Ok(out)
}

struct Comparer<'a> {
    options: &'a DiffOptions,
}

impl Comparer<'_> {
    fn message(
        &self,
        left: Option<&Record>,
        right: Option<&Record>,
        indent: usize,
        out: &mut String,
    ) -> Result<()> {
        let Some(descriptor) = left.or(right).map(|r| r.descriptor().clone()) else {
            return Ok(());
        };
        let key_field = self.options.key_field(&descriptor);
        let mut key_value = None;
        let mut body = String::new();

        for field in descriptor.fields() {
            let address = FieldAddress::of(field);
            if self.options.is_excluded(&address) {
                continue;
            }
            let mut v1 = left.and_then(|r| r.get_field(field));
            let mut v2 = right.and_then(|r| r.get_field(field));
            if v1 == v2 {
                if key_field == Some(&address) {
                    key_value = v1.as_ref().map(Value::to_string);
                }
                continue;
            }
            if let Some(mapper) = self.options.mapper().filter(|m| m.use_mapped_value()) {
                v1 = mapper.map(&address, v1.as_ref(), Side::First);
                v2 = mapper.map(&address, v2.as_ref(), Side::Second);
                if v1 == v2 {
                    continue;
                }
            }
            if !field.is_message() && (v1.is_none() || v2.is_none()) {
                let default = field.default_value();
                let present = v1.as_ref().or(v2.as_ref());
                if present.is_some() && present == default.as_ref() {
                    continue;
                }
            }
            if field.is_repeated() {
                self.repeated(field, &address, v1.as_ref(), v2.as_ref(), indent + 1, &mut body)?;
            } else {
                self.single(field, &address, v1.as_ref(), v2.as_ref(), indent + 1, &mut body)?;
            }
        }

        render::push_message_block(
            out,
            Sign::of(left, right),
            indent,
            descriptor.name(),
            key_value.as_deref(),
            &body,
        );
        Ok(())
    }

    fn repeated(
        &self,
        field: &FieldDescriptor,
        address: &FieldAddress,
        v1: Option<&Value>,
        v2: Option<&Value>,
        indent: usize,
        out: &mut String,
    ) -> Result<()> {
        let mut l1 = v1.and_then(Value::as_list).map(<[Value]>::to_vec).unwrap_or_default();
        let mut l2 = v2.and_then(Value::as_list).map(<[Value]>::to_vec).unwrap_or_default();

        if self.options.is_correlated(address) {
            cancel_common(&mut l1, &mut l2);
            if field.is_message() {
                let key = self.options.correlation_key(address).ok_or_else(|| {
                    RecordKitError::MissingCorrelationKey {
                        field: address.to_string(),
                    }
                })?;
                let key_of = |v: &Value| v.as_message().and_then(|r| extract_key(r, key));
                (l1, l2) = correlate(l1, l2, key_of, address, key)?.into_aligned();
            }
        }
        if l1 == l2 {
            return Ok(());
        }

        let mut body = String::new();
        for i in 0..l1.len().max(l2.len()) {
            let (e1, e2) = (l1.get(i), l2.get(i));
            if e1 == e2 {
                continue;
            }
            self.single(field, address, e1, e2, indent + 1, &mut body)?;
        }
        render::push_list_block(out, Sign::of(v1, v2), indent, field.name(), &body);
        Ok(())
    }

    fn single(
        &self,
        field: &FieldDescriptor,
        address: &FieldAddress,
        v1: Option<&Value>,
        v2: Option<&Value>,
        indent: usize,
        out: &mut String,
    ) -> Result<()> {
        if field.is_message() {
            return self.message(
                v1.and_then(Value::as_message),
                v2.and_then(Value::as_message),
                indent,
                out,
            );
        }
        let left = v1.map(|v| self.value_text(address, v, Side::First));
        let right = v2.map(|v| self.value_text(address, v, Side::Second));
        render::push_scalar_line(out, indent, field.name(), left.as_deref(), right.as_deref());
        Ok(())
    }

    /// Report text of one value: masked when redacted, annotated with its
    /// mapped value when the mapper is display-only and changes it.
    fn value_text(&self, address: &FieldAddress, value: &Value, side: Side) -> String {
        if self.options.is_redacted(address) {
            return Redacted::new(value).to_string();
        }
        let text = value.to_string();
        match self.options.mapper().filter(|m| !m.use_mapped_value()) {
            Some(mapper) => match mapper.map(address, Some(value), side) {
                Some(mapped) if mapped != *value => format!("{} ({})", text, mapped),
                _ => text,
            },
            None => text,
        }
    }
}
