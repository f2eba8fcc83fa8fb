use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::data_url;
use crate::error::AppError;

/// An uploaded résumé held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CvFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        Self {
            file_name: file_name.into(),
            mime_type: if mime_type.is_empty() {
                "application/octet-stream".to_string()
            } else {
                mime_type
            },
            bytes,
        }
    }
}

/// A résumé persisted in the saved collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    /// User-chosen label, shown in the picker.
    pub name: String,
    pub file_name: String,
    /// Data URL carrying the MIME type and base64 payload.
    pub data: String,
    pub date_added: DateTime<Utc>,
}

impl SavedResume {
    pub fn from_file(name: impl Into<String>, file: &CvFile, date_added: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            file_name: file.file_name.clone(),
            data: data_url::encode(&file.mime_type, &file.bytes),
            date_added,
        }
    }

    /// Rebuild the original upload from the stored data URL.
    pub fn to_file(&self) -> Result<CvFile, AppError> {
        let (mime_type, bytes) = data_url::decode(&self.data)?;
        Ok(CvFile::new(self.file_name.clone(), mime_type, bytes))
    }
}

/// Answer from the "save this CV?" dialogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveChoice {
    pub accepted: bool,
    pub name: Option<String>,
}

impl SaveChoice {
    pub fn declined() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            accepted: true,
            name: Some(name.into()),
        }
    }

    /// The name to save under, if the user accepted and typed one.
    pub fn resolved_name(&self) -> Option<&str> {
        if !self.accepted {
            return None;
        }
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_resume_json_shape() {
        let file = CvFile::new("resume.pdf", "application/pdf", b"%PDF".to_vec());
        let date = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let saved = SavedResume::from_file("Main CV", &file, date);

        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["name"], "Main CV");
        assert_eq!(json["fileName"], "resume.pdf");
        assert_eq!(json["data"], "data:application/pdf;base64,JVBERg==");
        assert_eq!(json["dateAdded"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_reads_millisecond_timestamps() {
        let raw = r#"[{"name":"CV","fileName":"cv.pdf","data":"data:application/pdf;base64,AA==","dateAdded":"2024-05-01T12:00:00.000Z"}]"#;
        let saved: Vec<SavedResume> = serde_json::from_str(raw).unwrap();
        assert_eq!(saved[0].to_file().unwrap().bytes, vec![0u8]);
    }

    #[test]
    fn test_empty_mime_defaults_to_octet_stream() {
        let file = CvFile::new("cv", "", vec![1, 2, 3]);
        assert_eq!(file.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_save_choice_resolution() {
        assert_eq!(SaveChoice::declined().resolved_name(), None);
        assert_eq!(SaveChoice::named("  ").resolved_name(), None);
        assert_eq!(SaveChoice::named(" Main CV ").resolved_name(), Some("Main CV"));
        let cancelled_prompt = SaveChoice {
            accepted: true,
            name: None,
        };
        assert_eq!(cancelled_prompt.resolved_name(), None);
    }
}
