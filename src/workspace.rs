//! Workspace state that outlives the workspace route.
//!
//! `App` provides one [`WorkspaceContext`]; the workspace page only reads
//! it, so visiting Settings and coming back keeps the letter, its version,
//! the form fields and the CV selection.

use leptos::prelude::*;

use crate::letter::{FormInputs, LetterSession};
use crate::resume::{CvFile, ResumeLibrary};

#[derive(Clone, Copy)]
pub struct WorkspaceContext {
    pub company_name: RwSignal<String>,
    pub job_description: RwSignal<String>,
    pub cv_file: RwSignal<Option<CvFile>>,
    pub library: RwSignal<ResumeLibrary>,
    pub session: RwSignal<LetterSession>,
}

impl WorkspaceContext {
    pub fn new(library: ResumeLibrary) -> Self {
        Self {
            company_name: RwSignal::new(String::new()),
            job_description: RwSignal::new(String::new()),
            cv_file: RwSignal::new(None),
            library: RwSignal::new(library),
            session: RwSignal::new(LetterSession::new()),
        }
    }

    /// Snapshot of the generation form.
    pub fn form_inputs(&self) -> FormInputs {
        FormInputs {
            company_name: self.company_name.get_untracked(),
            job_description: self.job_description.get_untracked(),
            cv_file: self.cv_file.get_untracked(),
        }
    }
}
