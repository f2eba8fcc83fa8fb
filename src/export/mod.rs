//! Export Renderer: printable letter layout and PDF download.
//!
//! Independent of the letter session; the page hands it the current text
//! and company name whenever a letter is on screen.

pub mod download;
pub mod font_metrics;
pub mod layout;
pub mod pdf;

use chrono::NaiveDate;

pub use layout::{export_file_name, format_letter_date, LetterLayout};
pub use pdf::render_pdf;

use crate::config::SenderDetails;
use crate::error::AppError;

/// A rendered letter ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedLetter {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Characters printed as `?` because the PDF font cannot encode them.
    pub unsupported: Vec<char>,
}

impl ExportedLetter {
    /// Message for the error slot when some text could not be printed.
    pub fn unsupported_note(&self) -> Option<String> {
        if self.unsupported.is_empty() {
            return None;
        }
        let chars: String = self.unsupported.iter().collect();
        Some(format!(
            "Some characters cannot be printed in the PDF and were replaced with '?': {}",
            chars
        ))
    }
}

/// Lay out and render `letter` for `company_name`, dated `date`.
pub fn export_letter(
    letter: &str,
    company_name: &str,
    sender: &SenderDetails,
    date: NaiveDate,
) -> Result<ExportedLetter, AppError> {
    if letter.trim().is_empty() {
        return Err(AppError::Export("there is no cover letter yet".to_string()));
    }
    let layout = LetterLayout::new(letter, company_name, sender, date);
    Ok(ExportedLetter {
        file_name: export_file_name(company_name),
        bytes: render_pdf(&layout)?,
        unsupported: font_metrics::unsupported_chars(&layout.printed_text()),
    })
}
