//! Text layout of the diff report.
//!
//! Every line is `<sign><padding><body>\n`, with `(2 x indent) + 1` spaces
//! of padding. Message and list blocks are written only when their body
//! holds at least one non-blank line.

use std::fmt;

const MESSAGE_START: &str = "{\n";
const MESSAGE_END: &str = "}\n";
const LIST_START: &str = "[\n";
const LIST_END: &str = "]\n";
const COLON_SPACE: &str = ": ";
const LEVEL_SPACE_COUNT: usize = 2;

/// Line marker: what happened to the value between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Only the right side holds a value.
    Create,
    /// Only the left side holds a value.
    Delete,
    /// Both sides hold a value.
    Update,
}

impl Sign {
    pub fn of<L, R>(left: Option<L>, right: Option<R>) -> Sign {
        match (left.is_some(), right.is_some()) {
            (false, true) => Sign::Create,
            (true, false) => Sign::Delete,
            _ => Sign::Update,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Sign::Create => '+',
            Sign::Delete => '-',
            Sign::Update => ' ',
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Sign followed by the padding for `indent`.
pub fn prefix(sign: Sign, indent: usize) -> String {
    let mut out = String::with_capacity(indent * LEVEL_SPACE_COUNT + 2);
    out.push(sign.as_char());
    out.extend(std::iter::repeat(' ').take(indent * LEVEL_SPACE_COUNT + 1));
    out
}

fn has_content(body: &str) -> bool {
    !body.trim().is_empty()
}

/// Write `Label[ (key)]: {` + body + `}`; returns whether anything was written.
pub fn push_message_block(
    out: &mut String,
    sign: Sign,
    indent: usize,
    label: &str,
    key: Option<&str>,
    body: &str,
) -> bool {
    if !has_content(body) {
        return false;
    }
    let pre = prefix(sign, indent);
    out.push_str(&pre);
    out.push_str(label);
    if let Some(key) = key.filter(|k| !k.is_empty()) {
        out.push_str(" (");
        out.push_str(key);
        out.push(')');
    }
    out.push_str(COLON_SPACE);
    out.push_str(MESSAGE_START);
    out.push_str(body);
    out.push_str(&pre);
    out.push_str(MESSAGE_END);
    true
}

/// Write `field: [` + body + `]`; returns whether anything was written.
pub fn push_list_block(out: &mut String, sign: Sign, indent: usize, field: &str, body: &str) -> bool {
    if !has_content(body) {
        return false;
    }
    let pre = prefix(sign, indent);
    out.push_str(&pre);
    out.push_str(field);
    out.push_str(COLON_SPACE);
    out.push_str(LIST_START);
    out.push_str(body);
    out.push_str(&pre);
    out.push_str(LIST_END);
    true
}

/// Write one scalar line: `left => right` for an update, else the present side.
pub fn push_scalar_line(
    out: &mut String,
    indent: usize,
    field: &str,
    left: Option<&str>,
    right: Option<&str>,
) {
    let sign = Sign::of(left, right);
    out.push_str(&prefix(sign, indent));
    out.push_str(field);
    out.push_str(COLON_SPACE);
    match (left, right) {
        (Some(l), Some(r)) => {
            out.push_str(l);
            out.push_str(" => ");
            out.push_str(r);
        }
        (Some(v), None) | (None, Some(v)) => out.push_str(v),
        (None, None) => {}
    }
    out.push('\n');
}
