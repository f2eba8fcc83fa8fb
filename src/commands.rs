use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;
use crate::resume::CvFile;

pub const GENERATE_PATH: &str = "generate-cover-letter";
pub const MODIFY_PATH: &str = "modify-cover-letter";

// -- Request/response types matching the generation service --

/// Multipart payload for `POST /generate-cover-letter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub cv_file: CvFile,
    pub company_name: String,
    pub job_description: String,
}

/// JSON body for `POST /modify-cover-letter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyRequest {
    pub original_cover_letter: String,
    pub modification_notes: String,
}

/// Success body shared by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

// -- API port --

/// The two calls the workspace makes to the generation service.
///
/// Futures are not `Send`: they run on the browser's single-threaded
/// executor.
#[allow(async_fn_in_trait)]
pub trait LetterApi {
    async fn generate_cover_letter(&self, request: &GenerateRequest) -> Result<String, AppError>;

    async fn modify_cover_letter(&self, request: &ModifyRequest) -> Result<String, AppError>;
}

/// `reqwest`-backed client for the generation service.
#[derive(Debug, Clone)]
pub struct HttpLetterApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLetterApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl LetterApi for HttpLetterApi {
    async fn generate_cover_letter(&self, request: &GenerateRequest) -> Result<String, AppError> {
        let url = self.endpoint(GENERATE_PATH);
        let cv = &request.cv_file;

        let cv_part = Part::bytes(cv.bytes.clone())
            .file_name(cv.file_name.clone())
            .mime_str(&cv.mime_type)
            .map_err(|e| AppError::Transport(format!("Invalid CV content type: {}", e)))?;
        let form = Form::new()
            .part("cv_file", cv_part)
            .text("company_name", request.company_name.clone())
            .text("job_description", request.job_description.clone());

        info!(
            "Requesting cover letter for '{}' ({} byte CV)",
            request.company_name,
            cv.bytes.len()
        );
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            warn!("{} returned {}", url, response.status());
            return Err(AppError::GenerateFailed);
        }

        read_cover_letter(response).await
    }

    async fn modify_cover_letter(&self, request: &ModifyRequest) -> Result<String, AppError> {
        let url = self.endpoint(MODIFY_PATH);

        info!(
            "Requesting modification ({} chars of notes)",
            request.modification_notes.len()
        );
        // `.json` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            warn!("{} returned {}", url, response.status());
            return Err(AppError::ModifyFailed);
        }

        read_cover_letter(response).await
    }
}

async fn read_cover_letter(response: reqwest::Response) -> Result<String, AppError> {
    response
        .json::<CoverLetterResponse>()
        .await
        .map(|body| body.cover_letter)
        .map_err(|e| AppError::InvalidResponse(e.to_string()))
}
