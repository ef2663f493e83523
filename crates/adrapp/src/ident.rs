//! # Identifiers and Numbering
//!
//! Records carry two identities:
//!
//! - **Sequence number**: the zero-padded prefix of the file name
//!   (`007_use_postgres.md`). It gives the creation order and is what humans
//!   refer to in conversation.
//! - **ID**: a short random string stored in the header. It is what the CLI
//!   takes as argument (`adr update f3Xk9_a2Lq`), so it is drawn from a
//!   filename and shell safe alphabet and never starts with `-`, which clap
//!   would read as a flag.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static RECORD_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)_\S+").expect("record name pattern is valid"));

const ID_ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";
const ID_LEN: usize = 10;

/// Sequence number of a record file name, `None` when the name does not
/// start with `<digits>_<something>`.
pub fn sequence_number(name: &str) -> Option<u32> {
    RECORD_NAME_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Next free sequence number: one past the highest number among `names`, in
/// any order. Names without a number are ignored.
pub fn next_sequence<I, S>(names: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| sequence_number(name.as_ref()))
        .max()
        .map_or(1, |n| n.saturating_add(1))
}

/// Mints a new record ID.
pub fn generate_id() -> String {
    loop {
        let bytes = Uuid::new_v4().into_bytes();
        // bytes 6 and 8 hold the uuid version and variant bits
        let id: String = bytes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 6 && *i != 8)
            .take(ID_LEN)
            .map(|(_, b)| ID_ALPHABET[(b & 0x3f) as usize] as char)
            .collect();
        if !id.starts_with('-') {
            return id;
        }
    }
}

/// Lowercase ASCII words joined by underscores: `"Use Postgres 16!"` gives
/// `use_postgres_16`.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn record_file_name(sequence: u32, slug: &str) -> String {
    format!("{:03}_{}.md", sequence, slug)
}

/// `"use POSTGRES for storage"` gives `"Use Postgres For Storage"`.
pub fn title_case(title: &str) -> String {
    title
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
