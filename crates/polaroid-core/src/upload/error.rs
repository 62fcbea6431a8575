use thiserror::Error;

use crate::collection::format_file_size;

/// Why a single file did not make it. Stored on the file, never raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File type not supported. Please use {allowed}.")]
    InvalidType { mime_type: String, allowed: String },

    #[error("File too large. Maximum size is {}.", size_label(.max_size))]
    TooLarge { size: u64, max_size: u64 },

    #[error("Upload failed. Please try again.")]
    TransferFailed,
}

impl UploadError {
    /// Detected when the file was added, before any transfer.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidType { .. } | Self::TooLarge { .. })
    }
}

fn size_label(bytes: &u64) -> String {
    format_file_size(*bytes, 2)
}

fn type_label(mime_type: &str) -> String {
    match mime_type {
        "image/jpeg" => "JPEG".to_string(),
        "image/png" => "PNG".to_string(),
        "image/webp" => "WebP".to_string(),
        "image/gif" => "GIF".to_string(),
        "image/avif" => "AVIF".to_string(),
        "image/heic" => "HEIC".to_string(),
        other => match other.split_once('/') {
            Some((_, subtype)) if !subtype.is_empty() => subtype.to_uppercase(),
            _ => other.to_string(),
        },
    }
}

/// Human list of accepted types: `JPEG`, `JPEG or PNG`, `JPEG, PNG, or WebP`.
pub fn describe_types(accepted: &[String]) -> String {
    let labels: Vec<String> = accepted.iter().map(|t| type_label(t)).collect();
    match labels.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    }
}
