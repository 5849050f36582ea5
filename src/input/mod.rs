//! Input processing module
//! Handles content type detection, file loading and upload validation

pub mod file_detector;
pub mod manager;
pub mod upload;
pub mod validator;

pub use upload::UploadFile;
pub use validator::UploadPolicy;
