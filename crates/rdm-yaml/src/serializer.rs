/*
 * serializer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Prints record lists back in indented YAML-like form.
//!
//! The output is meant for reading and for re-parsing simple trees, not for
//! byte-exact reproduction of the source: comments and flow styles are not
//! preserved, and single-line text is quoted only when a plain scalar would
//! read back differently.

use crate::SerializeOptions;
use rdm_records::{ByteString, List, RecordArena, RecordId, Value};
use std::borrow::Cow;
use std::fmt::{self, Write};

/// Write every record of the list that `handle` belongs to, starting from its
/// head, at `indent` spaces.
pub fn write_list<W: Write>(
    out: &mut W,
    arena: &RecordArena,
    handle: Option<RecordId>,
    indent: usize,
    options: &SerializeOptions,
) -> fmt::Result {
    for (_, record) in arena.iter(handle) {
        let value = record.value();
        if matches!(value, Value::Empty) {
            continue;
        }

        write_indent(out, indent)?;
        match record.key() {
            Some(key) => {
                write_scalar(out, &lossy(key))?;
                out.write_char(':')?;
            }
            None => out.write_char('-')?,
        }

        match value {
            Value::Empty => {}
            Value::SingleLineText(text) => {
                if !text.is_empty() {
                    out.write_char(' ')?;
                    write_scalar(out, &lossy(text))?;
                }
                writeln!(out)?;
            }
            Value::MultilineText(text) => {
                writeln!(out, " |")?;
                write_block(out, text, indent + options.indent_step)?;
            }
            Value::ChildList(child) => {
                writeln!(out)?;
                write_list(out, arena, child.handle(), indent + options.indent_step, options)?;
            }
        }
    }
    Ok(())
}

fn lossy(text: &ByteString) -> Cow<'_, str> {
    String::from_utf8_lossy(text.as_bytes())
}

/// Whether `text` has to be quoted to read back as the same scalar.
fn needs_quotes(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return true;
    };
    matches!(
        first,
        '-' | '?' | ':' | ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>'
            | '\'' | '"' | '%' | '@' | '`'
    ) || first.is_whitespace()
        || text.ends_with(char::is_whitespace)
        || text.ends_with(':')
        || text.contains(": ")
        || text.contains(" #")
        || text.chars().any(char::is_control)
}

fn write_scalar<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    if !needs_quotes(text) {
        return out.write_str(text);
    }
    out.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            '\r' => out.write_str("\\r")?,
            c if c.is_control() => write!(out, "\\u{:04X}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

fn write_block<W: Write>(out: &mut W, text: &ByteString, indent: usize) -> fmt::Result {
    for line in text.to_string_lossy().lines() {
        if line.is_empty() {
            writeln!(out)?;
        } else {
            write_indent(out, indent)?;
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

fn write_indent<W: Write>(out: &mut W, indent: usize) -> fmt::Result {
    write!(out, "{:indent$}", "", indent = indent)
}

/// [`fmt::Display`] adapter for a list.
///
/// ```
/// use rdm_yaml::{ByteString, List, ListDisplay, RecordArena, SerializeOptions, Value};
///
/// let mut arena = RecordArena::new();
/// let mut list = List::new();
/// let id = arena.new_record().unwrap();
/// arena.set_key(id, Some(ByteString::from("title"))).unwrap();
/// arena.set_value(id, Value::text(ByteString::from("Demo"), false)).unwrap();
/// arena.push(&mut list, id).unwrap();
///
/// let options = SerializeOptions::default();
/// let text = ListDisplay::new(&arena, &list, &options).to_string();
/// assert_eq!(text, "title: Demo\n");
/// ```
pub struct ListDisplay<'a> {
    arena: &'a RecordArena,
    handle: Option<RecordId>,
    options: &'a SerializeOptions,
}

impl<'a> ListDisplay<'a> {
    pub fn new(
        arena: &'a RecordArena,
        list: &List,
        options: &'a SerializeOptions,
    ) -> Self {
        Self {
            arena,
            handle: list.handle(),
            options,
        }
    }
}

impl fmt::Display for ListDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.arena, self.handle, 0, self.options)
    }
}
