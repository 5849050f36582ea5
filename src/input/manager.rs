//! Input manager for loading local files into uploadable form

use crate::error::{AtsClientError, Result};
use crate::input::file_detector::FileType;
use crate::input::upload::UploadFile;
use log::{debug, info};
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    content_type_override: Option<String>,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            content_type_override: None,
        }
    }

    /// Declare this content type for every loaded file instead of the one
    /// derived from the extension.
    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type_override = content_type;
        self
    }

    pub async fn load_upload(&self, path: &Path) -> Result<UploadFile> {
        if !path.exists() {
            return Err(AtsClientError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AtsClientError::InvalidInput(
                format!("Not a file: {}", path.display())
            ))?;

        let content_type = match &self.content_type_override {
            Some(declared) => declared.clone(),
            None => self.detect_file_type(path).content_type().to_string(),
        };

        info!("Reading {} as {}", path.display(), content_type);
        let bytes = fs::read(path).await?;
        debug!("Loaded {} bytes from {}", bytes.len(), path.display());

        Ok(UploadFile::new(name, content_type, bytes))
    }

    pub async fn read_job_description(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(AtsClientError::InvalidInput(
                format!("Job description file does not exist: {}", path.display())
            ));
        }

        info!("Reading job description: {}", path.display());
        Ok(fs::read_to_string(path).await?)
    }

    fn detect_file_type(&self, path: &Path) -> FileType {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
