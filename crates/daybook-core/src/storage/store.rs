//! Journal entry store
//!
//! Durable CRUD over the `journal_entries` table. The typed `Entry`
//! record is constructed once here, at the store boundary; nothing
//! downstream reads rows positionally.

use chrono::{DateTime, Timelike, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Entry, EntryDraft};
use crate::query::EntryFilter;
use crate::storage::schema::{init_schema, needs_init};

/// Durable store for journal entries
pub struct EntryStore {
    conn: Connection,
}

impl EntryStore {
    /// Open or create the SQLite database at the configured path
    pub fn open(config: &Config) -> Result<Self> {
        let path = config.sqlite_path();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::with_connection(Connection::open(&path)?)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        if needs_init(&conn) {
            init_schema(&conn)?;
        }
        Ok(Self { conn })
    }

    /// Create a new entry, returning the store-assigned id
    pub fn create(&self, draft: &EntryDraft) -> Result<i64> {
        let created_at = now_to_the_second();
        self.conn.execute(
            "INSERT INTO journal_entries (title, mood, content, date_created) \
             VALUES (?, ?, ?, ?)",
            params![draft.title(), draft.mood(), draft.content(), created_at],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "created journal entry");
        Ok(id)
    }

    /// Get an entry by id
    pub fn get(&self, id: i64) -> Result<Entry> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, mood, content, date_created FROM journal_entries WHERE id = ?",
        )?;

        stmt.query_row(params![id], entry_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Error::NotFound { id },
                other => Error::Database(other),
            })
    }

    /// Replace title, mood, and content of an existing entry
    ///
    /// `id` and `date_created` are never touched.
    pub fn update(&self, id: i64, draft: &EntryDraft) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE journal_entries SET title = ?, mood = ?, content = ? WHERE id = ?",
            params![draft.title(), draft.mood(), draft.content(), id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound { id });
        }
        debug!(id, "updated journal entry");
        Ok(())
    }

    /// Permanently remove an entry
    pub fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM journal_entries WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(Error::NotFound { id });
        }
        debug!(id, "deleted journal entry");
        Ok(())
    }

    /// All entries, newest first
    pub fn list_all(&self) -> Result<Vec<Entry>> {
        self.list(&EntryFilter::new())
    }

    /// Entries matching the filter, newest first, ties broken by
    /// descending id
    pub fn list(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let (where_clause, filter_params) = filter.where_clause();
        let sql = format!(
            "SELECT id, title, mood, content, date_created FROM journal_entries{} \
             ORDER BY date_created DESC, id DESC",
            where_clause
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params_from_iter(filter_params.iter().map(|p| p.as_ref())),
            entry_from_row,
        )?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        debug!(count = entries.len(), "listed journal entries");
        Ok(entries)
    }
}

/// Map a row to the typed record; the one place column order matters
fn entry_from_row(row: &Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        title: row.get(1)?,
        mood: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Current UTC time truncated to whole seconds, so the stored value,
/// `DATE()` comparisons, and the display format all agree
fn now_to_the_second() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::{NaiveDate, TimeZone};

    fn draft(title: &str, mood: Mood, content: &str) -> EntryDraft {
        EntryDraft::new(title, mood, content).unwrap()
    }

    /// Backdate an entry so ordering and date-filter tests don't depend
    /// on the wall clock
    fn set_created(store: &EntryStore, id: i64, y: i32, mo: u32, d: u32, h: u32, mi: u32) {
        let ts = Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap();
        store
            .conn
            .execute(
                "UPDATE journal_entries SET date_created = ? WHERE id = ?",
                params![ts, id],
            )
            .unwrap();
    }

    fn row_count(store: &EntryStore) -> i64 {
        store
            .conn
            .query_row("SELECT COUNT(*) FROM journal_entries", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let store = EntryStore::open_in_memory().unwrap();

        let id = store
            .create(&draft("First day", Mood::Excited, "We moved in today."))
            .unwrap();
        let entry = store.get(id).unwrap();

        assert_eq!(entry.id, id);
        assert_eq!(entry.title, "First day");
        assert_eq!(entry.mood, Mood::Excited);
        assert_eq!(entry.content, "We moved in today.");
        assert_eq!(entry.created_at.nanosecond(), 0);
        assert!(entry.created_at <= Utc::now());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = EntryStore::open_in_memory().unwrap();

        let first = store.create(&draft("One", Mood::Happy, "a")).unwrap();
        store.delete(first).unwrap();
        let second = store.create(&draft("Two", Mood::Happy, "b")).unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = EntryStore::open_in_memory().unwrap();
        let err = store.get(999).unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 999 }));
    }

    #[test]
    fn test_update_replaces_fields_only() {
        let store = EntryStore::open_in_memory().unwrap();
        let id = store.create(&draft("Draft", Mood::Neutral, "v1")).unwrap();
        let before = store.get(id).unwrap();

        store
            .update(id, &draft("Final", Mood::Happy, "v2"))
            .unwrap();
        let after = store.get(id).unwrap();

        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.title, "Final");
        assert_eq!(after.mood, Mood::Happy);
        assert_eq!(after.content, "v2");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = EntryStore::open_in_memory().unwrap();
        let err = store
            .update(7, &draft("Title", Mood::Sad, "text"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 7 }));
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = EntryStore::open_in_memory().unwrap();
        let id = store.create(&draft("Gone", Mood::Sad, "soon")).unwrap();

        store.delete(id).unwrap();

        assert!(matches!(store.get(id), Err(Error::NotFound { .. })));
        assert!(matches!(store.delete(id), Err(Error::NotFound { .. })));
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn test_invalid_draft_never_reaches_store() {
        let store = EntryStore::open_in_memory().unwrap();
        assert!(EntryDraft::new("", Mood::Happy, "content").is_err());
        assert!(EntryDraft::new("Title", Mood::Happy, "  ").is_err());
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn test_list_all_orders_newest_first() {
        let store = EntryStore::open_in_memory().unwrap();
        let a = store.create(&draft("A", Mood::Happy, "x")).unwrap();
        let b = store.create(&draft("B", Mood::Happy, "x")).unwrap();
        let c = store.create(&draft("C", Mood::Happy, "x")).unwrap();
        set_created(&store, a, 2024, 3, 14, 8, 0);
        set_created(&store, b, 2024, 3, 15, 8, 0);
        set_created(&store, c, 2024, 3, 13, 20, 0);

        let titles: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_list_breaks_timestamp_ties_by_id() {
        let store = EntryStore::open_in_memory().unwrap();
        let a = store.create(&draft("Older id", Mood::Happy, "x")).unwrap();
        let b = store.create(&draft("Newer id", Mood::Happy, "x")).unwrap();
        set_created(&store, a, 2024, 3, 14, 8, 0);
        set_created(&store, b, 2024, 3, 14, 8, 0);

        let ids: Vec<i64> = store.list_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn test_search_matches_title_or_content() {
        let store = EntryStore::open_in_memory().unwrap();
        store
            .create(&draft("The cat nap", Mood::Happy, "slept all day"))
            .unwrap();
        store
            .create(&draft("Garden notes", Mood::Neutral, "saw the cat by the pond"))
            .unwrap();
        store
            .create(&draft("Work log", Mood::Sad, "meetings"))
            .unwrap();

        let found = store
            .list(&EntryFilter::new().with_search("cat"))
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found
            .iter()
            .all(|e| e.title.contains("cat") || e.content.contains("cat")));
    }

    #[test]
    fn test_search_uses_engine_collation_for_case() {
        let store = EntryStore::open_in_memory().unwrap();
        store
            .create(&draft("Cat pictures", Mood::Happy, "so many"))
            .unwrap();

        // SQLite LIKE is ASCII-case-insensitive
        let found = store
            .list(&EntryFilter::new().with_search("cAT"))
            .unwrap();
        assert_eq!(found.len(), 1);

        let none = store
            .list(&EntryFilter::new().with_search("dog"))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let store = EntryStore::open_in_memory().unwrap();
        store
            .create(&draft("Progress", Mood::Excited, "50% done"))
            .unwrap();
        store
            .create(&draft("Progress", Mood::Excited, "500 words"))
            .unwrap();

        let found = store
            .list(&EntryFilter::new().with_search("50%"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content, "50% done");
    }

    #[test]
    fn test_date_filter_ignores_time_of_day() {
        let store = EntryStore::open_in_memory().unwrap();
        let a = store.create(&draft("Morning", Mood::Happy, "x")).unwrap();
        let b = store.create(&draft("Evening", Mood::Happy, "x")).unwrap();
        let c = store.create(&draft("Other day", Mood::Happy, "x")).unwrap();
        set_created(&store, a, 2024, 3, 14, 6, 30);
        set_created(&store, b, 2024, 3, 14, 22, 15);
        set_created(&store, c, 2024, 3, 15, 6, 30);

        let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let found = store.list(&EntryFilter::new().with_date(day)).unwrap();

        let titles: Vec<String> = found.into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Evening", "Morning"]);
    }

    #[test]
    fn test_filters_combine_conjunctively() {
        let store = EntryStore::open_in_memory().unwrap();
        let a = store
            .create(&draft("Cat day", Mood::Happy, "played outside"))
            .unwrap();
        let b = store
            .create(&draft("Cat night", Mood::Happy, "slept"))
            .unwrap();
        set_created(&store, a, 2024, 3, 14, 9, 0);
        set_created(&store, b, 2024, 3, 15, 9, 0);

        let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let found = store
            .list(&EntryFilter::new().with_search("cat").with_date(day))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Cat day");
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let store = EntryStore::open_in_memory().unwrap();
        for i in 0..4 {
            store
                .create(&draft(&format!("Entry {}", i), Mood::Neutral, "body"))
                .unwrap();
        }

        assert_eq!(store.list(&EntryFilter::new()).unwrap().len(), 4);
        assert_eq!(store.list_all().unwrap().len(), 4);
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let store = EntryStore::open_in_memory().unwrap();
        let found = store
            .list(&EntryFilter::new().with_search("nothing here"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_open_creates_database_on_disk() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("data"),
            font_dir: None,
        };

        let store = EntryStore::open(&config).unwrap();
        let id = store
            .create(&draft("Persisted", Mood::Happy, "on disk"))
            .unwrap();
        drop(store);

        // Reopen and read back
        let store = EntryStore::open(&config).unwrap();
        assert_eq!(store.get(id).unwrap().title, "Persisted");
    }
}
