//! Canonical encoding of nested values.
//!
//! Objects and lists cannot take part in whole-row equality, so they are
//! replaced by a JSON string with object keys sorted at every level. Two
//! structurally equal values always encode to the same bytes regardless of
//! their source key order.
//!
//! The text layout matches the labels already stored by earlier exports:
//! `", "` and `": "` separators, non-ASCII escaped as `\uXXXX`, and float
//! exponents written with a sign and two digits (`1e+16`).

use std::collections::BTreeMap;
use std::io;

use resto_model::{Value, format_timestamp};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::Formatter;
use tracing::warn;

/// Encode a cell for tabular storage.
///
/// Scalars (null included) are returned unchanged. Nested values become
/// their canonical JSON string; if that fails the value's display form is
/// used instead and a warning is logged.
pub fn encode(value: &Value) -> Value {
    if !value.is_nested() {
        return value.clone();
    }
    match canonical_json(value) {
        Ok(text) => Value::String(text),
        Err(error) => {
            let fallback = value.to_string();
            warn!(
                %error,
                kind = value.type_name(),
                fallback = %fallback,
                "canonical encoding failed; using non-canonical rendering"
            );
            Value::String(fallback)
        }
    }
}

/// JSON with sorted object keys and ASCII-only output.
///
/// Fails on non-finite floats, which JSON cannot represent. Timestamps are
/// written as ISO 8601 strings. When an object repeats a key the last
/// value wins.
pub fn canonical_json(value: &Value) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedAsciiFormatter);
    Canonical(value).serialize(&mut serializer)?;
    String::from_utf8(out).map_err(serde_json::Error::custom)
}

struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_text(value).as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Shortest round-trip float text with a signed, two-digit exponent.
fn float_text(value: f64) -> String {
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Value::Float(v) => Err(S::Error::custom(format!(
                "non-finite float {v} has no JSON representation"
            ))),
            Value::String(s) => serializer.serialize_str(s),
            Value::Timestamp(ts) => serializer.serialize_str(&format_timestamp(ts)),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Canonical(item))?;
                }
                seq.end()
            }
            Value::Object(pairs) => {
                let sorted: BTreeMap<&str, &Value> =
                    pairs.iter().map(|(k, v)| (k.as_str(), v)).collect();
                let mut map = serializer.serialize_map(Some(sorted.len()))?;
                for (key, item) in sorted {
                    map.serialize_entry(key, &Canonical(item))?;
                }
                map.end()
            }
        }
    }
}
