use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use crate::commands::{GenerateRequest, ModifyRequest};
use crate::error::AppError;
use crate::resume::CvFile;

/// Sequence number handed out when a request is dispatched.
pub type RequestToken = u64;

/// What the user has typed into the generation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub company_name: String,
    pub job_description: String,
    pub cv_file: Option<CvFile>,
}

impl FormInputs {
    /// Check that every field is filled and build the request.
    pub fn to_request(&self) -> Result<GenerateRequest, AppError> {
        let cv_file = self
            .cv_file
            .clone()
            .ok_or_else(|| AppError::Validation("Please upload or select a CV".to_string()))?;
        if self.company_name.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter a company name".to_string(),
            ));
        }
        if self.job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter a job description".to_string(),
            ));
        }
        Ok(GenerateRequest {
            cv_file,
            company_name: self.company_name.clone(),
            job_description: self.job_description.clone(),
        })
    }
}

/// Derived view of the session's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No letter yet
    Idle,
    Generating,
    /// A letter is on screen
    Ready,
    Modifying,
}

/// A dispatched generate call waiting for its response.
#[derive(Debug, Clone)]
pub struct PendingGenerate {
    pub token: RequestToken,
    pub request: GenerateRequest,
}

/// A dispatched modify call waiting for its response.
#[derive(Debug, Clone)]
pub struct PendingModify {
    pub token: RequestToken,
    pub request: ModifyRequest,
}

/// The current letter, its version history counter, and request bookkeeping.
///
/// Requests are two-phase: `begin_*` validates and records the dispatch,
/// the caller awaits the network, then `finish_*` applies the outcome.
/// Generate and modify draw tokens from one counter and only the latest
/// token's response is applied, so an older response arriving late can
/// never overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterSession {
    text: String,
    version: u32,
    last_modified: Option<DateTime<Utc>>,
    modification_notes: String,
    error: Option<String>,
    generating: Option<RequestToken>,
    modifying: Option<RequestToken>,
    latest_token: RequestToken,
}

impl Default for LetterSession {
    fn default() -> Self {
        Self {
            text: String::new(),
            version: 1,
            last_modified: None,
            modification_notes: String::new(),
            error: None,
            generating: None,
            modifying: None,
            latest_token: 0,
        }
    }
}

impl LetterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_letter(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn modification_notes(&self) -> &str {
        &self.modification_notes
    }

    pub fn set_modification_notes(&mut self, notes: impl Into<String>) {
        self.modification_notes = notes.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Put a failure from outside the letter flow (résumé storage, export)
    /// into the shared error slot.
    pub fn report_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn is_generating(&self) -> bool {
        self.generating.is_some()
    }

    pub fn is_modifying(&self) -> bool {
        self.modifying.is_some()
    }

    /// Whether the modify control should accept a click.
    pub fn can_modify(&self) -> bool {
        !self.is_modifying() && !self.modification_notes.trim().is_empty()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_generating() {
            SessionPhase::Generating
        } else if self.is_modifying() {
            SessionPhase::Modifying
        } else if self.has_letter() {
            SessionPhase::Ready
        } else {
            SessionPhase::Idle
        }
    }

    fn next_token(&mut self) -> RequestToken {
        self.latest_token += 1;
        self.latest_token
    }

    /// Start a generation. Returns `None` when the inputs are incomplete,
    /// in which case the validation message is in the error slot.
    pub fn begin_generate(&mut self, inputs: &FormInputs) -> Option<PendingGenerate> {
        let request = match inputs.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };

        self.error = None;
        let token = self.next_token();
        self.generating = Some(token);
        info!("Dispatching generate request #{}", token);
        Some(PendingGenerate { token, request })
    }

    /// Apply a generation outcome. Returns `true` if it was applied.
    pub fn finish_generate(
        &mut self,
        token: RequestToken,
        result: Result<String, AppError>,
    ) -> bool {
        if self.generating == Some(token) {
            self.generating = None;
        }
        if token != self.latest_token {
            debug!("Discarding stale generate response #{}", token);
            return false;
        }

        match result {
            Ok(letter) => {
                self.text = letter;
                self.version = 1;
                self.modification_notes.clear();
                self.last_modified = Some(Utc::now());
                info!("Cover letter generated ({} chars)", self.text.len());
            }
            Err(e) => {
                warn!("Generate request #{} failed: {}", token, e);
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Start a modification of the current letter. Returns `None` when the
    /// notes are blank; no request must be sent then.
    pub fn begin_modify(&mut self) -> Option<PendingModify> {
        if self.modification_notes.trim().is_empty() {
            self.error = Some("Please enter modification notes".to_string());
            return None;
        }

        self.error = None;
        let token = self.next_token();
        self.modifying = Some(token);
        info!("Dispatching modify request #{}", token);
        Some(PendingModify {
            token,
            request: ModifyRequest {
                original_cover_letter: self.text.clone(),
                modification_notes: self.modification_notes.clone(),
            },
        })
    }

    /// Apply a modification outcome. Returns `true` if it was applied.
    pub fn finish_modify(&mut self, token: RequestToken, result: Result<String, AppError>) -> bool {
        if self.modifying == Some(token) {
            self.modifying = None;
        }
        if token != self.latest_token {
            debug!("Discarding stale modify response #{}", token);
            return false;
        }

        match result {
            Ok(letter) => {
                self.text = letter;
                self.modification_notes.clear();
                self.version += 1;
                self.last_modified = Some(Utc::now());
                info!("Cover letter modified, now version {}", self.version);
            }
            Err(e) => {
                warn!("Modify request #{} failed: {}", token, e);
                self.error = Some(e.to_string());
            }
        }
        true
    }
}

/// Render a timestamp the way a browser's default locale string does,
/// e.g. `10/16/2026, 2:05:09 PM`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
