use std::path::Path;

use crate::{
    errors::{AppError, AppResult},
    http::FileUpload,
};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const ALLOWED_MIME_TYPES: [&str; 2] = ["application/pdf", "text/plain"];

pub fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") | Some("text") | Some("md") => "text/plain",
        _ => "application/octet-stream",
    }
}

pub fn check_source_type(mime_type: &str) -> AppResult<()> {
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(AppError::Validation(
            "Please upload a PDF or text file".to_string(),
        ));
    }
    Ok(())
}

pub fn check_source_size(size: u64) -> AppResult<()> {
    if size > MAX_UPLOAD_BYTES as u64 {
        return Err(AppError::Validation(
            "File size must be less than 10MB".to_string(),
        ));
    }
    Ok(())
}

/// Checks a source document before it is sent for question generation.
pub fn prepare_upload(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> AppResult<FileUpload> {
    check_source_type(mime_type)?;
    check_source_size(bytes.len() as u64)?;

    Ok(FileUpload {
        field: "file".to_string(),
        file_name: file_name.to_string(),
        mime_type: mime_type.to_string(),
        bytes,
    })
}
