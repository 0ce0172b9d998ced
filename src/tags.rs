// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Rendering of operation argument values into span tags.
//!
//! Tag values must always be safely printable: rendering is total (it
//! builds strings from [`Display`] implementations and cannot fail), and
//! absent values never produce the literal string "null" or "None".

use std::fmt::{Display, Write};

/// Render an optional value. `None` renders as the empty string.
pub fn nullable<T: Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Render a collection as its elements joined by `", "`.
///
/// An empty collection renders as the empty string, not `"[]"`.
pub fn collection_to_string<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{item}");
    }
    out
}

/// Render a mapping as `key -> value` pairs joined by `", "`.
pub fn map_to_string<K, V, I>(entries: I) -> String
where
    K: Display,
    V: Display,
    I: IntoIterator<Item = (K, V)>,
{
    let mut out = String::new();
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{key} -> {value}");
    }
    out
}

/// Render a slice in fixed positional form: `[a, b]`.
pub fn slice_to_string<T: Display>(items: &[T]) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{item}");
    }
    out.push(']');
    out
}
