//! # Header Codec
//!
//! Record files start with a YAML block fenced by `---` lines; everything
//! after the closing fence is the body and is never interpreted.
//!
//! ## Reading
//!
//! [`split`] cuts the file into the raw header mapping and the body slice.
//! [`decode`] then maps that untyped mapping onto a [`Record`] one field at a
//! time:
//!
//! - Keys are matched loosely: `creation_date`, `creationDate` and
//!   `creation-date` all land on the same field. Unknown keys are ignored.
//! - `id` is mandatory. `status` must be one of the [`Status`] values.
//! - Dates are RFC 3339 strings. A missing date falls back to
//!   `0001-01-01T00:00:00Z` plus one day per filename sequence number, so that
//!   legacy files without dates still sort in filename order. Those fallback
//!   dates are an ordering heuristic, not a real chronology.
//! - `tags` and `superseders` accept any list of scalars.
//!
//! ## Writing
//!
//! [`encode`] emits the fields in a fixed order with two-space list
//! indentation and omits empty sets. The output has no surrounding blank lines
//! and is meant to be dropped into the templates of [`crate::templates`].
//! Formatting is normalized; field values survive a parse/encode cycle.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use serde_yaml::{Mapping, Value};

use crate::error::{AdrError, Result};
use crate::ident::sequence_number;
use crate::model::{Record, Status};
use crate::tagset::{scalar_to_string, TagSet};

pub const DELIMITER: &str = "---";

/// Splits a record file into its header mapping and its body.
pub fn split(text: &str) -> Result<(Mapping, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let first = lines
        .next()
        .ok_or_else(|| AdrError::malformed("file is empty"))?;
    if first.trim_end() != DELIMITER {
        return Err(AdrError::malformed(format!(
            "file should start with a {DELIMITER} line"
        )));
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let mapping = parse_mapping(&text[header_start..offset])?;
            return Ok((mapping, &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(AdrError::malformed(format!(
        "header is not closed by a {DELIMITER} line"
    )))
}

fn parse_mapping(raw: &str) -> Result<Mapping> {
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(raw)
        .map_err(|e| AdrError::malformed(format!("invalid yaml: {e}")))?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AdrError::malformed("header should be a mapping")),
    }
}

/// `creation_date`, `creationDate`, `Creation-Date` all normalize to `creationdate`.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Default)]
struct HeaderFields<'a> {
    id: Option<&'a Value>,
    title: Option<&'a Value>,
    author: Option<&'a Value>,
    status: Option<&'a Value>,
    creation_date: Option<&'a Value>,
    last_update_date: Option<&'a Value>,
    tags: Option<&'a Value>,
    superseders: Option<&'a Value>,
}

/// Builds a record from a header mapping. `name` is the file name, used for
/// the date fallback; `body` is stored untouched.
pub fn decode(mapping: &Mapping, name: &str, body: &str) -> Result<Record> {
    let mut fields = HeaderFields::default();
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            tracing::debug!(file = name, "ignoring non-string header key");
            continue;
        };
        let slot = match normalize_key(key).as_str() {
            "id" => &mut fields.id,
            "title" => &mut fields.title,
            "author" => &mut fields.author,
            "status" => &mut fields.status,
            "creationdate" => &mut fields.creation_date,
            "lastupdatedate" => &mut fields.last_update_date,
            "tags" => &mut fields.tags,
            "superseders" => &mut fields.superseders,
            _ => {
                tracing::debug!(file = name, key, "ignoring unknown header key");
                continue;
            }
        };
        *slot = Some(value);
    }

    let id = fields
        .id
        .and_then(scalar_to_string)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AdrError::malformed("missing id"))?;

    let sequence = sequence_number(name);

    Ok(Record {
        id,
        title: decode_text("title", fields.title)?,
        author: decode_text("author", fields.author)?,
        status: decode_status(fields.status)?,
        creation_date: decode_date("creation_date", fields.creation_date, sequence)?,
        last_update_date: decode_date("last_update_date", fields.last_update_date, sequence)?,
        tags: decode_set("tags", fields.tags)?,
        superseders: decode_set("superseders", fields.superseders)?,
        name: name.to_string(),
        body: body.to_string(),
    })
}

fn decode_text(key: &str, value: Option<&Value>) -> Result<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(v) => scalar_to_string(v)
            .ok_or_else(|| AdrError::malformed(format!("{key} should be a scalar value"))),
    }
}

fn decode_status(value: Option<&Value>) -> Result<Status> {
    match value {
        None | Some(Value::Null) => Ok(Status::Unknown),
        Some(v) => match scalar_to_string(v) {
            Some(s) => s.parse(),
            None => Err(AdrError::malformed("status should be a scalar value")),
        },
    }
}

fn decode_date(
    field: &'static str,
    value: Option<&Value>,
    sequence: Option<u32>,
) -> Result<DateTime<Utc>> {
    match value {
        None | Some(Value::Null) => Ok(fallback_date(sequence)),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| AdrError::InvalidDate {
                field,
                value: s.clone(),
                reason: e.to_string(),
            }),
        Some(other) => Err(AdrError::InvalidDate {
            field,
            value: scalar_to_string(other).unwrap_or_else(|| format!("{other:?}")),
            reason: "invalid date value".to_string(),
        }),
    }
}

fn decode_set(key: &str, value: Option<&Value>) -> Result<TagSet> {
    match value {
        None => Ok(TagSet::new()),
        Some(v) => TagSet::from_yaml(key, v),
    }
}

/// `0001-01-01T00:00:00Z`, the date given to records without one.
pub fn zero_date() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn fallback_date(sequence: Option<u32>) -> DateTime<Utc> {
    zero_date() + Duration::days(i64::from(sequence.unwrap_or(0)))
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serializes the metadata of `record` (not its name nor body).
pub fn encode(record: &Record) -> String {
    let mut out = String::new();
    push_scalar(&mut out, "id", &record.id);
    push_scalar(&mut out, "title", &record.title);
    push_scalar(&mut out, "author", &record.author);
    push_scalar(&mut out, "status", record.status.as_str());
    push_scalar(&mut out, "creation_date", &format_date(record.creation_date));
    push_scalar(
        &mut out,
        "last_update_date",
        &format_date(record.last_update_date),
    );
    push_list(&mut out, "tags", &record.tags);
    push_list(&mut out, "superseders", &record.superseders);
    out.trim_matches('\n').to_string()
}

fn push_scalar(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(&yaml_scalar(value));
    out.push('\n');
}

fn push_list(out: &mut String, key: &str, set: &TagSet) {
    if set.is_empty() {
        return;
    }
    out.push_str(key);
    out.push_str(":\n");
    for item in set.iter() {
        out.push_str("  - ");
        out.push_str(&yaml_scalar(item));
        out.push('\n');
    }
}

/// A single-line YAML scalar for `value`, quoted only when YAML needs it.
fn yaml_scalar(value: &str) -> String {
    if let Ok(yaml) = serde_yaml::to_string(value) {
        let yaml = yaml.trim_end_matches('\n');
        if !yaml.contains('\n') {
            return yaml.to_string();
        }
    }
    // multi-line values: JSON strings are valid double-quoted YAML scalars
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Parses a whole record file.
pub fn parse_record(name: &str, text: &str) -> Result<Record> {
    let (mapping, body) = split(text)?;
    decode(&mapping, name, body)
}
