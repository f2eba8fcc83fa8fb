use chrono::Utc;
use tracing::{info, warn};

use super::dialogs::ResumeDialogs;
use super::types::{CvFile, SavedResume};
use crate::error::AppError;
use crate::storage::KeyValueStore;

/// Storage key holding the JSON list of saved résumés.
pub const SAVED_RESUMES_KEY: &str = "savedCVs";

/// The saved résumé collection plus the picker's current selection.
///
/// Every mutation rewrites the whole collection in the store first and
/// only touches memory once the write succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeLibrary {
    saved: Vec<SavedResume>,
    selected: Option<String>,
}

impl ResumeLibrary {
    /// Read the persisted collection. Missing, unreadable, or corrupt data
    /// yields an empty library.
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            saved: load_all(store),
            selected: None,
        }
    }

    pub fn saved(&self) -> &[SavedResume] {
        &self.saved
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Drop the selection marker, e.g. after a fresh upload replaced the
    /// form's résumé.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Append `file` under `name` and persist.
    pub fn save(
        &mut self,
        store: &impl KeyValueStore,
        name: &str,
        file: &CvFile,
    ) -> Result<(), AppError> {
        let mut updated = self.saved.clone();
        updated.push(SavedResume::from_file(name, file, Utc::now()));
        persist(store, &updated)?;

        info!("Saved CV '{}' ({} bytes)", name, file.bytes.len());
        self.saved = updated;
        Ok(())
    }

    /// Look up `name` (first match wins) and rebuild its file.
    ///
    /// Returns `Ok(None)` for the empty placeholder or an unknown name, in
    /// which case nothing changes.
    pub fn select(&mut self, name: &str) -> Result<Option<CvFile>, AppError> {
        let Some(entry) = self.saved.iter().find(|cv| cv.name == name) else {
            return Ok(None);
        };
        let file = entry.to_file()?;
        self.selected = Some(entry.name.clone());
        Ok(Some(file))
    }

    /// Remove every entry called `name` and persist.
    ///
    /// Returns `true` when the removed résumé was the active selection; the
    /// caller must then clear the form's résumé as well.
    pub fn delete(&mut self, store: &impl KeyValueStore, name: &str) -> Result<bool, AppError> {
        let updated: Vec<SavedResume> = self
            .saved
            .iter()
            .filter(|cv| cv.name != name)
            .cloned()
            .collect();
        persist(store, &updated)?;

        info!("Deleted CV '{}'", name);
        self.saved = updated;

        let was_selected = self.selected.as_deref() == Some(name);
        if was_selected {
            self.selected = None;
        }
        Ok(was_selected)
    }
}

/// Read the persisted collection, failing open to an empty list.
pub fn load_all(store: &impl KeyValueStore) -> Vec<SavedResume> {
    match store.get(SAVED_RESUMES_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Saved CV collection is corrupt, starting empty: {}", e);
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Failed to read saved CVs: {}", e);
            Vec::new()
        }
    }
}

fn persist(store: &impl KeyValueStore, saved: &[SavedResume]) -> Result<(), AppError> {
    let json = serde_json::to_string(saved).map_err(|e| AppError::Storage(e.to_string()))?;
    store.set(SAVED_RESUMES_KEY, &json)
}

/// Offer to keep a freshly uploaded file.
///
/// Returns `Ok(true)` when the file was saved; a declined dialog or an
/// empty name skips the save and returns `Ok(false)`.
pub async fn offer_to_save(
    library: &mut ResumeLibrary,
    store: &impl KeyValueStore,
    dialogs: &impl ResumeDialogs,
    file: &CvFile,
) -> Result<bool, AppError> {
    let choice = dialogs.offer_save(&file.file_name).await;
    match choice.resolved_name() {
        Some(name) => {
            library.save(store, name, file)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Ask for confirmation, then delete `name`.
///
/// Returns `Ok(Some(was_selected))` when the entry was removed and
/// `Ok(None)` when the user cancelled.
pub async fn confirm_and_delete(
    library: &mut ResumeLibrary,
    store: &impl KeyValueStore,
    dialogs: &impl ResumeDialogs,
    name: &str,
) -> Result<Option<bool>, AppError> {
    if !dialogs.confirm_delete(name).await {
        return Ok(None);
    }
    library.delete(store, name).map(Some)
}

/// Make a fresh upload the form's résumé, then offer to keep it.
///
/// The form file is replaced and the selection marker cleared before the
/// dialog runs, so both stay in step even if saving fails afterwards.
/// Returns whether the upload was saved.
pub async fn accept_upload(
    library: &mut ResumeLibrary,
    store: &impl KeyValueStore,
    dialogs: &impl ResumeDialogs,
    form_file: &mut Option<CvFile>,
    upload: CvFile,
) -> Result<bool, AppError> {
    library.clear_selection();
    *form_file = Some(upload.clone());
    offer_to_save(library, store, dialogs, &upload).await
}

/// Select the saved résumé `name` into the form.
///
/// Returns `Ok(false)` without touching the form for the placeholder or an
/// unknown name.
pub fn select_saved(
    library: &mut ResumeLibrary,
    form_file: &mut Option<CvFile>,
    name: &str,
) -> Result<bool, AppError> {
    match library.select(name)? {
        Some(file) => {
            *form_file = Some(file);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Confirm and delete `name`, clearing the form's résumé when it was the
/// active selection. Returns whether anything was deleted.
pub async fn delete_saved(
    library: &mut ResumeLibrary,
    store: &impl KeyValueStore,
    dialogs: &impl ResumeDialogs,
    form_file: &mut Option<CvFile>,
    name: &str,
) -> Result<bool, AppError> {
    match confirm_and_delete(library, store, dialogs, name).await? {
        Some(was_selected) => {
            if was_selected {
                *form_file = None;
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::types::SaveChoice;
    use crate::storage::MemoryStore;
    use std::cell::Cell;

    struct ScriptedDialogs {
        save: SaveChoice,
        delete: bool,
        asked: Cell<u32>,
    }

    impl ScriptedDialogs {
        fn new(save: SaveChoice, delete: bool) -> Self {
            Self {
                save,
                delete,
                asked: Cell::new(0),
            }
        }
    }

    impl ResumeDialogs for ScriptedDialogs {
        async fn offer_save(&self, _file_name: &str) -> SaveChoice {
            self.asked.set(self.asked.get() + 1);
            self.save.clone()
        }

        async fn confirm_delete(&self, _name: &str) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.delete
        }
    }

    fn pdf(name: &str, bytes: &[u8]) -> CvFile {
        CvFile::new(name, "application/pdf", bytes.to_vec())
    }

    #[test]
    fn test_load_empty_store() {
        let library = ResumeLibrary::load(&MemoryStore::new());
        assert!(library.is_empty());
        assert_eq!(library.selected(), None);
    }

    #[test]
    fn test_load_corrupt_collection_fails_open() {
        let store = MemoryStore::with_entry(SAVED_RESUMES_KEY, "[{\"name\":");
        assert!(ResumeLibrary::load(&store).is_empty());
    }

    #[test]
    fn test_save_persists_whole_collection() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "First", &pdf("a.pdf", b"aaa")).unwrap();
        library.save(&store, "Second", &pdf("b.pdf", b"bbb")).unwrap();

        let reloaded = ResumeLibrary::load(&store);
        let names: Vec<_> = reloaded.saved().iter().map(|cv| cv.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(reloaded.saved()[1].file_name, "b.pdf");
    }

    #[test]
    fn test_select_reconstructs_identical_bytes() {
        let store = MemoryStore::new();
        let original: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
        let upload = CvFile::new("resume.pdf", "application/pdf", original.clone());

        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "X", &upload).unwrap();

        // Fresh load to go through the stored JSON.
        let mut library = ResumeLibrary::load(&store);
        let restored = library.select("X").unwrap().unwrap();
        assert_eq!(restored, upload);
        assert_eq!(restored.bytes, original);
        assert_eq!(library.selected(), Some("X"));
    }

    #[test]
    fn test_select_unknown_or_placeholder_is_noop() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "X", &pdf("x.pdf", b"x")).unwrap();

        assert_eq!(library.select("").unwrap(), None);
        assert_eq!(library.select("missing").unwrap(), None);
        assert_eq!(library.selected(), None);
    }

    #[test]
    fn test_duplicate_names_select_first_match() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "CV", &pdf("old.pdf", b"old")).unwrap();
        library.save(&store, "CV", &pdf("new.pdf", b"new")).unwrap();

        let file = library.select("CV").unwrap().unwrap();
        assert_eq!(file.file_name, "old.pdf");
        assert_eq!(file.bytes, b"old");
    }

    #[test]
    fn test_select_malformed_entry_reports_error() {
        let raw = r#"[{"name":"Broken","fileName":"b.pdf","data":"garbage","dateAdded":"2024-01-01T00:00:00Z"}]"#;
        let store = MemoryStore::with_entry(SAVED_RESUMES_KEY, raw);
        let mut library = ResumeLibrary::load(&store);

        let err = library.select("Broken").unwrap_err();
        assert!(err.to_string().starts_with("Operation failed"));
        assert_eq!(library.selected(), None);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "Keep", &pdf("k.pdf", b"k")).unwrap();
        library.save(&store, "Drop", &pdf("d.pdf", b"d")).unwrap();
        library.select("Drop").unwrap();

        assert!(library.delete(&store, "Drop").unwrap());
        assert_eq!(library.selected(), None);
        assert_eq!(library.saved().len(), 1);
        assert_eq!(ResumeLibrary::load(&store).saved()[0].name, "Keep");
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "Keep", &pdf("k.pdf", b"k")).unwrap();
        library.save(&store, "Drop", &pdf("d.pdf", b"d")).unwrap();
        library.select("Keep").unwrap();

        assert!(!library.delete(&store, "Drop").unwrap());
        assert_eq!(library.selected(), Some("Keep"));
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "CV", &pdf("1.pdf", b"1")).unwrap();
        library.save(&store, "CV", &pdf("2.pdf", b"2")).unwrap();

        library.delete(&store, "CV").unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_library_unchanged() {
        let store = MemoryStore::failing_writes();
        let mut library = ResumeLibrary::load(&store);

        let err = library.save(&store, "X", &pdf("x.pdf", b"x")).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_offer_to_save_accepted() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        let dialogs = ScriptedDialogs::new(SaveChoice::named("Main"), true);

        let saved = offer_to_save(&mut library, &store, &dialogs, &pdf("resume.pdf", b"cv"))
            .await
            .unwrap();
        assert!(saved);
        assert_eq!(library.saved()[0].name, "Main");
        assert_eq!(dialogs.asked.get(), 1);
    }

    #[tokio::test]
    async fn test_offer_to_save_declined_or_unnamed_skips() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);

        for choice in [SaveChoice::declined(), SaveChoice::named("")] {
            let dialogs = ScriptedDialogs::new(choice, true);
            let saved = offer_to_save(&mut library, &store, &dialogs, &pdf("resume.pdf", b"cv"))
                .await
                .unwrap();
            assert!(!saved);
        }
        assert!(library.is_empty());
        assert_eq!(store.get(SAVED_RESUMES_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_confirm_and_delete_cancelled() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "CV", &pdf("cv.pdf", b"cv")).unwrap();
        library.select("CV").unwrap();

        let dialogs = ScriptedDialogs::new(SaveChoice::declined(), false);
        let outcome = confirm_and_delete(&mut library, &store, &dialogs, "CV")
            .await
            .unwrap();
        assert_eq!(outcome, None);
        assert_eq!(library.saved().len(), 1);
        assert_eq!(library.selected(), Some("CV"));
    }

    #[tokio::test]
    async fn test_confirm_and_delete_selected() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "CV", &pdf("cv.pdf", b"cv")).unwrap();
        library.select("CV").unwrap();

        let dialogs = ScriptedDialogs::new(SaveChoice::declined(), true);
        let outcome = confirm_and_delete(&mut library, &store, &dialogs, "CV")
            .await
            .unwrap();
        assert_eq!(outcome, Some(true));
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_upload_after_selection_clears_marker() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "X", &pdf("x.pdf", b"saved")).unwrap();

        let mut form_file = None;
        assert!(select_saved(&mut library, &mut form_file, "X").unwrap());
        assert_eq!(library.selected(), Some("X"));
        assert_eq!(form_file.as_ref().map(|f| f.bytes.clone()), Some(b"saved".to_vec()));

        let dialogs = ScriptedDialogs::new(SaveChoice::declined(), true);
        let upload = pdf("fresh.pdf", b"fresh");
        let saved = accept_upload(&mut library, &store, &dialogs, &mut form_file, upload.clone())
            .await
            .unwrap();

        assert!(!saved);
        assert_eq!(library.selected(), None);
        assert_eq!(form_file, Some(upload));
        assert_eq!(library.saved().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_sets_form_file_even_when_save_fails() {
        let store = MemoryStore::failing_writes();
        let mut library = ResumeLibrary::load(&store);
        let mut form_file = None;
        let dialogs = ScriptedDialogs::new(SaveChoice::named("Main"), true);
        let upload = pdf("resume.pdf", b"cv");

        let err = accept_upload(&mut library, &store, &dialogs, &mut form_file, upload.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(form_file, Some(upload));
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_accepted_upload_is_saved_but_not_selected() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        let mut form_file = None;
        let dialogs = ScriptedDialogs::new(SaveChoice::named("Main"), true);

        let saved = accept_upload(&mut library, &store, &dialogs, &mut form_file, pdf("r.pdf", b"cv"))
            .await
            .unwrap();
        assert!(saved);
        assert_eq!(library.saved()[0].name, "Main");
        assert_eq!(library.selected(), None);
        assert!(form_file.is_some());
    }

    #[test]
    fn test_select_placeholder_keeps_form_file() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "X", &pdf("x.pdf", b"x")).unwrap();
        let upload = pdf("mine.pdf", b"mine");
        let mut form_file = Some(upload.clone());

        assert!(!select_saved(&mut library, &mut form_file, "").unwrap());
        assert_eq!(form_file, Some(upload));
    }

    #[tokio::test]
    async fn test_deleting_selected_clears_form_file() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "X", &pdf("x.pdf", b"x")).unwrap();
        let mut form_file = None;
        select_saved(&mut library, &mut form_file, "X").unwrap();

        let dialogs = ScriptedDialogs::new(SaveChoice::declined(), true);
        assert!(delete_saved(&mut library, &store, &dialogs, &mut form_file, "X").await.unwrap());
        assert_eq!(form_file, None);
        assert_eq!(library.selected(), None);
        assert!(ResumeLibrary::load(&store).is_empty());
    }

    #[tokio::test]
    async fn test_deleting_other_entry_keeps_form_file() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "Keep", &pdf("k.pdf", b"k")).unwrap();
        library.save(&store, "Drop", &pdf("d.pdf", b"d")).unwrap();
        let mut form_file = None;
        select_saved(&mut library, &mut form_file, "Keep").unwrap();

        let dialogs = ScriptedDialogs::new(SaveChoice::declined(), true);
        assert!(delete_saved(&mut library, &store, &dialogs, &mut form_file, "Drop").await.unwrap());
        assert_eq!(form_file.map(|f| f.file_name), Some("k.pdf".to_string()));
        assert_eq!(library.selected(), Some("Keep"));
    }

    #[tokio::test]
    async fn test_cancelled_delete_keeps_form_file() {
        let store = MemoryStore::new();
        let mut library = ResumeLibrary::load(&store);
        library.save(&store, "X", &pdf("x.pdf", b"x")).unwrap();
        let mut form_file = None;
        select_saved(&mut library, &mut form_file, "X").unwrap();

        let dialogs = ScriptedDialogs::new(SaveChoice::declined(), false);
        assert!(!delete_saved(&mut library, &store, &dialogs, &mut form_file, "X").await.unwrap());
        assert!(form_file.is_some());
        assert_eq!(library.selected(), Some("X"));
    }
}
