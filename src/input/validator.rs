//! Client-side checks applied before a file is accepted into the session

use crate::error::ValidationError;
use crate::input::file_detector::{DOCX, MSWORD, PDF, PLAIN_TEXT};
use crate::input::upload::UploadFile;
use serde::{Deserialize, Serialize};

/// 5 MiB
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_CONTENT_TYPES: [&str; 4] = [PDF, MSWORD, DOCX, PLAIN_TEXT];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub accepted_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_UPLOAD_BYTES,
            accepted_types: ACCEPTED_CONTENT_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    /// Type is checked before size, so an oversized file of the wrong type
    /// reports `UnsupportedType`.
    pub fn validate(&self, file: &UploadFile) -> Result<(), ValidationError> {
        if !self.accepted_types.iter().any(|t| t == file.content_type()) {
            return Err(ValidationError::UnsupportedType {
                content_type: file.content_type().to_string(),
            });
        }

        if file.size() > self.max_file_size_bytes {
            return Err(ValidationError::TooLarge {
                size: file.size(),
                limit: self.max_file_size_bytes,
            });
        }

        Ok(())
    }
}

pub fn validate(file: &UploadFile) -> Result<(), ValidationError> {
    UploadPolicy::default().validate(file)
}
