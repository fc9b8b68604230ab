//! Entry command handlers

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use daybook_core::{Entry, EntryDraft, EntryFilter, EntryStore, Error, Mood};

use crate::output::Output;
use crate::prompt::confirm;

/// Add a new entry
pub fn add(
    store: &EntryStore,
    title: String,
    mood: Mood,
    content: String,
    output: &Output,
) -> Result<()> {
    let draft = EntryDraft::new(title, mood, content).map_err(Error::Validation)?;
    let id = store.create(&draft).context("Failed to create entry")?;

    let entry = store.get(id)?;
    output.success(&format!("Added entry {}", id));
    output.print_entry(&entry);

    Ok(())
}

/// List entries, optionally narrowed by search text and/or date
pub fn list(
    store: &EntryStore,
    search: Option<String>,
    date: Option<NaiveDate>,
    output: &Output,
) -> Result<()> {
    let mut filter = EntryFilter::new();
    if let Some(text) = search {
        filter = filter.with_search(text);
    }
    if let Some(date) = date {
        filter = filter.with_date(date);
    }

    let entries = store.list(&filter).context("Failed to list entries")?;
    output.print_entries(&entries);
    Ok(())
}

/// Show a single entry
pub fn show(store: &EntryStore, id: i64, output: &Output) -> Result<()> {
    let entry = store.get(id)?;
    output.print_entry(&entry);
    Ok(())
}

/// Edit an entry; omitted fields keep their stored values
pub fn edit(
    store: &EntryStore,
    id: i64,
    title: Option<String>,
    mood: Option<Mood>,
    content: Option<String>,
    output: &Output,
) -> Result<()> {
    if title.is_none() && mood.is_none() && content.is_none() {
        bail!("Nothing to change; pass --title, --mood, or --content");
    }

    let current = store.get(id)?;
    let draft = merge_fields(current, title, mood, content)?;
    store.update(id, &draft)?;

    output.success(&format!("Updated entry {}", id));
    output.print_entry(&store.get(id)?);

    Ok(())
}

/// Delete an entry
pub fn delete(store: &EntryStore, id: i64, yes: bool, output: &Output) -> Result<()> {
    let entry = store.get(id)?;

    // Confirm deletion
    if !yes && output.should_prompt() {
        println!("Delete entry {} - {}", entry.id, entry.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete(id)?;
    output.success(&format!("Deleted entry {}", id));

    Ok(())
}

/// List the closed mood set
pub fn moods(output: &Output) -> Result<()> {
    output.print_moods(&Mood::options());
    Ok(())
}

/// Overlay the provided fields on the stored entry and revalidate the
/// full triple
fn merge_fields(
    current: Entry,
    title: Option<String>,
    mood: Option<Mood>,
    content: Option<String>,
) -> Result<EntryDraft> {
    let draft = EntryDraft::new(
        title.unwrap_or(current.title),
        mood.unwrap_or(current.mood),
        content.unwrap_or(current.content),
    )
    .map_err(Error::Validation)?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored_entry() -> Entry {
        Entry {
            id: 1,
            title: "Old title".to_string(),
            mood: Mood::Neutral,
            content: "Old content".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_keeps_omitted_fields() {
        let draft = merge_fields(stored_entry(), Some("New title".to_string()), None, None).unwrap();
        assert_eq!(draft.title(), "New title");
        assert_eq!(draft.mood(), Mood::Neutral);
        assert_eq!(draft.content(), "Old content");
    }

    #[test]
    fn test_merge_replaces_all_fields() {
        let draft = merge_fields(
            stored_entry(),
            Some("T".to_string()),
            Some(Mood::Angry),
            Some("C".to_string()),
        )
        .unwrap();
        assert_eq!(draft.title(), "T");
        assert_eq!(draft.mood(), Mood::Angry);
        assert_eq!(draft.content(), "C");
    }

    #[test]
    fn test_merge_revalidates_blank_override() {
        let result = merge_fields(stored_entry(), Some("  ".to_string()), None, None);
        assert!(result.is_err());
    }
}
