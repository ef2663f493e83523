use crate::model::{Record, Status};

/// Criteria for `list`. Every non-empty criterion has to match; an empty
/// filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub authors: Vec<String>,
    pub statuses: Vec<Status>,
    /// A record matches when it carries at least one of these tags.
    pub tags: Vec<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty() && self.statuses.is_empty() && self.tags.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        (self.authors.is_empty() || self.authors.iter().any(|a| *a == record.author))
            && (self.statuses.is_empty() || self.statuses.contains(&record.status))
            && (self.tags.is_empty() || self.tags.iter().any(|t| record.tags.contains(t)))
    }

    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::zero_date;
    use crate::tagset::TagSet;

    fn record(id: &str, author: &str, status: Status, tags: &[&str]) -> Record {
        Record {
            id: id.to_string(),
            title: id.to_string(),
            author: author.to_string(),
            status,
            creation_date: zero_date(),
            last_update_date: zero_date(),
            tags: tags.iter().copied().collect::<TagSet>(),
            superseders: TagSet::new(),
            name: format!("001_{id}.md"),
            body: String::new(),
        }
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            record("a", "alice", Status::Accepted, &["db"]),
            record("b", "bob", Status::Proposed, &["api", "db"]),
            record("c", "alice", Status::Deprecated, &[]),
        ]
    }

    #[test]
    fn empty_filter_matches_all() {
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(sample())), vec!["a", "b", "c"]);
    }

    #[test]
    fn by_author() {
        let filter = RecordFilter {
            authors: vec!["alice".into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec!["a", "c"]);
    }

    #[test]
    fn by_status() {
        let filter = RecordFilter {
            statuses: vec![Status::Proposed, Status::Deprecated],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec!["b", "c"]);
    }

    #[test]
    fn by_any_tag() {
        let filter = RecordFilter {
            tags: vec!["api".into(), "missing".into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec!["b"]);
    }

    #[test]
    fn criteria_combine() {
        let filter = RecordFilter {
            authors: vec!["alice".into(), "bob".into()],
            statuses: vec![Status::Accepted, Status::Proposed],
            tags: vec!["db".into()],
        };
        assert_eq!(ids(&filter.apply(sample())), vec!["a", "b"]);

        let none = RecordFilter {
            authors: vec!["carol".into()],
            tags: vec!["db".into()],
            ..Default::default()
        };
        assert!(none.apply(sample()).is_empty());
    }
}
