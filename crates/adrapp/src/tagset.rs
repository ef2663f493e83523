//! Ordered, deduplicated string sets used for `tags` and `superseders`.
//!
//! A [`TagSet`] never remembers insertion order: it always reads back in
//! ascending lexicographic order. Headers written from a set are therefore
//! stable no matter how the values were entered, which keeps diffs of record
//! files small.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeSet;

use crate::error::{AdrError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union with `elements`. Already present elements are left alone.
    pub fn append<I, S>(&mut self, elements: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(elements.into_iter().map(Into::into));
    }

    /// Difference with `elements`. Unknown elements are ignored.
    pub fn remove<I, S>(&mut self, elements: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for elem in elements {
            self.0.remove(elem.as_ref());
        }
    }

    /// Replaces the whole content with `elements`.
    pub fn set<I, S>(&mut self, elements: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.clear();
        self.append(elements);
    }

    pub fn replace<I, S>(&mut self, elements: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(elements)
    }

    pub fn contains(&self, elem: &str) -> bool {
        self.0.contains(elem)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a set from an untyped header value.
    ///
    /// Every scalar element is coerced to its string form and nulls are
    /// dropped. A lone scalar becomes a one-element set; nested mappings are
    /// rejected.
    pub fn from_yaml(key: &str, value: &Value) -> Result<Self> {
        let mut set = TagSet::new();
        match value {
            Value::Null => {}
            Value::Sequence(items) => {
                for item in items {
                    if let Some(s) = scalar_to_string(item) {
                        set.0.insert(s);
                    } else if !item.is_null() {
                        return Err(AdrError::malformed(format!(
                            "{key} should only contain scalar values"
                        )));
                    }
                }
            }
            Value::Tagged(tagged) => return TagSet::from_yaml(key, &tagged.value),
            other => match scalar_to_string(other) {
                Some(s) => {
                    set.0.insert(s);
                }
                None => {
                    return Err(AdrError::malformed(format!("{key} should be a list")));
                }
            },
        }
        Ok(set)
    }
}

/// String form of a YAML scalar, `None` for nulls and collections.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        set.append(iter);
        set
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
