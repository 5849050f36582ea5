//! Declared content type detection for local files

pub const PDF: &str = "application/pdf";
pub const MSWORD: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PLAIN_TEXT: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Doc,
    Docx,
    Text,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "doc" => FileType::Doc,
            "docx" => FileType::Docx,
            "txt" | "text" => FileType::Text,
            _ => FileType::Unknown,
        }
    }

    /// The MIME type a browser would declare for a file of this kind.
    pub fn content_type(&self) -> &'static str {
        match self {
            FileType::Pdf => PDF,
            FileType::Doc => MSWORD,
            FileType::Docx => DOCX,
            FileType::Text => PLAIN_TEXT,
            FileType::Unknown => OCTET_STREAM,
        }
    }
}
