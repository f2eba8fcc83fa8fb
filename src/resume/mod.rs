//! Résumé Manager: uploads, the saved résumé collection, and selection.

pub mod data_url;
pub mod dialogs;
pub mod library;
pub mod types;

pub use dialogs::{BrowserDialogs, ResumeDialogs};
pub use library::{
    accept_upload, confirm_and_delete, delete_saved, load_all, offer_to_save, select_saved,
    ResumeLibrary, SAVED_RESUMES_KEY,
};
pub use types::{CvFile, SaveChoice, SavedResume};
