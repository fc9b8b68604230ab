//! Query/filter engine for journal entries
//!
//! `EntryFilter` holds the optional criteria that narrow the entry
//! list: free-text search and an exact calendar date. Each present
//! dimension compiles to one parameterized SQL predicate; predicates
//! are AND-combined and values are always bound, never interpolated.

use chrono::NaiveDate;
use rusqlite::ToSql;

/// Optional criteria narrowing the entry list
///
/// An empty filter matches every entry. Results are always ordered
/// newest first, ties broken by descending id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    search: Option<String>,
    on_date: Option<NaiveDate>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text dimension: substring match against title or content,
    /// either field qualifying.
    ///
    /// Matching uses SQLite's native `LIKE` collation, which is
    /// case-insensitive for ASCII. Text that is blank after trimming
    /// counts as absent.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        self.search = if text.is_empty() { None } else { Some(text) };
        self
    }

    /// Calendar-date dimension: entries created on this date, ignoring
    /// time-of-day.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.on_date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.on_date.is_none()
    }

    /// Compile the filter to a WHERE clause and its bound parameters
    ///
    /// Returns an empty clause when no dimension is present.
    pub(crate) fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut predicates: Vec<&'static str> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref text) = self.search {
            predicates.push("(title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\')");
            let pattern = format!("%{}%", escape_like(text));
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }

        if let Some(date) = self.on_date {
            predicates.push("DATE(date_created) = ?");
            params.push(Box::new(date));
        }

        if predicates.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", predicates.join(" AND ")), params)
        }
    }
}

/// Escape LIKE metacharacters so user input matches literally
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_clause() {
        let (clause, params) = EntryFilter::new().where_clause();
        assert!(clause.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_blank_search_counts_as_absent() {
        let filter = EntryFilter::new().with_search("   ");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_search_dimension() {
        let (clause, params) = EntryFilter::new().with_search("cat").where_clause();
        assert_eq!(
            clause,
            " WHERE (title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\')"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_date_dimension() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let (clause, params) = EntryFilter::new().with_date(date).where_clause();
        assert_eq!(clause, " WHERE DATE(date_created) = ?");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let (clause, params) = EntryFilter::new()
            .with_search("cat")
            .with_date(date)
            .where_clause();
        assert_eq!(
            clause,
            " WHERE (title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\') \
             AND DATE(date_created) = ?"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
