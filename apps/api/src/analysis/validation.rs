//! Input gate for the analysis pipeline. Runs before any rasterization or
//! network call; rejections carry a human-readable reason for the form.

use crate::analysis::UploadedDocument;
use crate::errors::AppError;

pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
pub const SUPPORTED_EXTENSION: &str = ".pdf";
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 10_000;

/// Validates the free-text job description.
///
/// The under-50-characters case reads like a warning to the user but blocks
/// the action, matching the established behavior of the form.
pub fn validate_job_description(job_description: &str) -> Result<(), AppError> {
    let trimmed = job_description.trim();

    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a job description.".to_string(),
        ));
    }

    if trimmed.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(AppError::InvalidInput(
            "Job description seems too short. Please provide more details.".to_string(),
        ));
    }

    if job_description.chars().count() > MAX_JOB_DESCRIPTION_CHARS {
        return Err(AppError::InvalidInput(
            "Job description is too long. Please keep it under 10,000 characters.".to_string(),
        ));
    }

    Ok(())
}

/// Validates the uploaded résumé file before it is rendered.
pub fn validate_document(document: &UploadedDocument) -> Result<(), AppError> {
    if document.data.is_empty() {
        return Err(AppError::InvalidInput(
            "The uploaded file is empty.".to_string(),
        ));
    }

    if document.size() > MAX_FILE_SIZE_BYTES {
        return Err(AppError::InvalidInput(
            "File size exceeds 10MB limit.".to_string(),
        ));
    }

    if !document
        .filename
        .to_lowercase()
        .ends_with(SUPPORTED_EXTENSION)
    {
        return Err(AppError::InvalidInput(
            "Please upload a PDF file.".to_string(),
        ));
    }

    Ok(())
}
