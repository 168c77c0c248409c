use std::path::Path;

use crate::application::{AppError, FormSession};
use crate::domain::LineItemDraft;

/// Extensions accepted by the estimate upload field.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "csv", "txt"];

/// Anything able to turn an estimate file into draft work rows.
pub trait EstimateSource {
    fn read_drafts(&self, path: &Path) -> Result<Vec<LineItemDraft>, AppError>;
}

/// Accepts estimate files by extension without reading their contents.
/// Parsing spreadsheets is not supported, so no drafts are ever produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadStub;

impl EstimateSource for UploadStub {
    fn read_drafts(&self, path: &Path) -> Result<Vec<LineItemDraft>, AppError> {
        check_extension(path)?;
        Ok(Vec::new())
    }
}

/// Result of attaching an estimate to the open form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub file_name: String,
    pub drafts: usize,
}

/// Fail unless `path` ends in one of [`ACCEPTED_EXTENSIONS`].
pub fn check_extension(path: &Path) -> Result<(), AppError> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));

    if accepted {
        Ok(())
    } else {
        Err(AppError::UnsupportedUpload {
            file: path.display().to_string(),
        })
    }
}

/// Read drafts from `path` through `source` and seed the session's rows.
pub fn upload(
    session: &mut FormSession,
    source: &dyn EstimateSource,
    path: &Path,
) -> Result<UploadResult, AppError> {
    if session.active().is_none() {
        return Err(AppError::NoActiveForm);
    }

    let drafts = source.read_drafts(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let count = drafts.len();

    session.attach_upload(file_name.clone(), drafts)?;

    Ok(UploadResult {
        file_name,
        drafts: count,
    })
}
