use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("Failed to load image '{path}': {message}")]
    ImageLoadError { path: PathBuf, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Cache directory error for '{path}': {message}")]
    CacheDirError { path: PathBuf, message: String },

    #[error("Export error for '{path}': {message}")]
    ExportError { path: PathBuf, message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CropError>;

impl CropError {
    /// Returns true if this error is recoverable (user can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CropError::FileNotFound { .. }
                | CropError::CacheDirError { .. }
                | CropError::ExportError { .. }
                | CropError::IoError { .. }
        )
    }

    /// Returns a user-friendly error message with recovery suggestions
    pub fn user_message(&self) -> String {
        let base_message = self.to_string();
        let suggestion = match self {
            CropError::FileNotFound { .. } => {
                "Check if the file exists and you have permission to access it."
            }
            CropError::UnsupportedFormat { .. } => {
                "This image format is not supported. Try converting it to a common format like JPEG or PNG."
            }
            CropError::ImageLoadError { .. } => {
                "The image file may be corrupted. Try opening it in another viewer."
            }
            CropError::CacheDirError { .. } => {
                "The crop cache directory could not be created. Check disk space and permissions."
            }
            CropError::ExportError { .. } => {
                "Export failed. Check if you have write permissions in the cache directory."
            }
            CropError::IoError { .. } => "File system error occurred. Check disk space and permissions.",
        };

        format!("{}\n\n{}", base_message, suggestion)
    }
}
