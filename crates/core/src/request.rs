//! Submission payloads and precondition validation.
//!
//! Requests are constructed fresh per submission and never persisted.
//! Every precondition is checked here, before any network call: a
//! validation failure must cost zero requests.

use serde::Serialize;

use crate::error::CoreError;

/// A room photo supplied by the user.
///
/// Only JPEG uploads are accepted, matching the backend's expectations.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, forwarded as the multipart part's file name.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Check that the upload is non-empty and recognizably a JPEG.
    ///
    /// Format detection reads only the magic bytes, never decodes the
    /// full image.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.bytes.is_empty() {
            return Err(CoreError::Validation(
                "Please upload an image of your room".into(),
            ));
        }

        match image::guess_format(&self.bytes) {
            Ok(image::ImageFormat::Jpeg) => Ok(()),
            Ok(other) => Err(CoreError::Validation(format!(
                "Only JPEG images are allowed (got {other:?})"
            ))),
            Err(_) => Err(CoreError::Validation(
                "Uploaded file is not a recognizable image".into(),
            )),
        }
    }
}

/// Parameters for a fresh redesign submission.
#[derive(Debug, Clone)]
pub struct RedesignRequest {
    /// Free-text description of the desired redesign.
    pub prompt: String,
    /// Budget ceiling for purchasable furniture.
    pub max_price: f64,
    /// The room photo to redesign.
    pub image: ImageUpload,
}

/// JSON shape of the `params` multipart field on `POST /jobs/generate`.
#[derive(Debug, Serialize)]
pub struct RedesignParams<'a> {
    pub prompt: &'a str,
    pub max_price: f64,
}

impl RedesignRequest {
    /// Validate every submission precondition.
    ///
    /// Checks the image (present, JPEG), the prompt (non-empty after
    /// trimming), and the budget (finite, non-negative).
    pub fn validate(&self) -> Result<(), CoreError> {
        self.image.validate()?;
        validate_prompt(&self.prompt, "Please describe your vision for the room")?;
        validate_budget(self.max_price)?;
        Ok(())
    }

    /// Borrowed view serialized into the `params` field.
    pub fn params(&self) -> RedesignParams<'_> {
        RedesignParams {
            prompt: &self.prompt,
            max_price: self.max_price,
        }
    }
}

/// Parameters for an edit follow-up against an existing job.
///
/// The target job id travels in the URL, not the body.
#[derive(Debug, Clone, Serialize)]
pub struct EditRequest {
    /// Free-text description of the modifications to make.
    pub edit_prompt: String,
    /// Budget ceiling, reused from the original submission.
    pub max_price: f64,
}

impl EditRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_prompt(
            &self.edit_prompt,
            "Please enter the modifications you'd like to make",
        )?;
        validate_budget(self.max_price)?;
        Ok(())
    }
}

/// Parse user-entered budget text into a price ceiling.
///
/// Trims surrounding whitespace and rejects empty input, non-numeric
/// input, and non-finite or negative values.
pub fn parse_budget(text: &str) -> Result<f64, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Please provide a budget".into()));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CoreError::Validation(format!("Budget is not a number: {trimmed:?}")))?;

    validate_budget(value)?;
    Ok(value)
}

fn validate_prompt(prompt: &str, message: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::Validation(message.into()));
    }
    Ok(())
}

fn validate_budget(value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation("Budget must be a finite number".into()));
    }
    if value < 0.0 {
        return Err(CoreError::Validation("Budget cannot be negative".into()));
    }
    Ok(())
}
