use std::path::Path;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::core::card::{GoalCard, cards_from_values, retain_valid};
use crate::error::{GoalError, Result};

pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_CARDS: usize = 10_000;
pub const DOCUMENT_FILE_NAME: &str = "goals.json";

/// What is known about an import file before any of its content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    /// Declared content type, when the source provides one.
    pub media_type: Option<String>,
}

/// Cards accepted from a document plus the number of elements that were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imported {
    pub cards: Vec<GoalCard>,
    pub dropped: usize,
}

impl Imported {
    pub fn is_partial(&self) -> bool {
        self.dropped > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub contents: String,
    pub dropped: usize,
}

/// Refuse names without a `.json` extension or carrying path-traversal characters.
pub fn check_name(name: &str) -> Result<()> {
    if !name.to_lowercase().ends_with(".json")
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(GoalError::rejected("Please select a valid .json file."));
    }
    Ok(())
}

/// Admission checks on name, size and declared type.
pub fn check_file(meta: &FileMeta) -> Result<()> {
    check_name(&meta.name)?;

    if meta.size > MAX_FILE_BYTES {
        return Err(GoalError::rejected(format!(
            "File is too large. Maximum allowed size is {}MB.",
            MAX_FILE_BYTES / (1024 * 1024)
        )));
    }

    if let Some(media_type) = meta.media_type.as_deref() {
        if !media_type.is_empty() && !media_type.contains("json") {
            return Err(GoalError::rejected(
                "File does not appear to be a valid JSON file.",
            ));
        }
    }

    Ok(())
}

/// Parse a goal document. Each element is checked on its own; invalid ones are dropped.
pub fn parse_document(text: &str) -> Result<Imported> {
    if text.len() as u64 > MAX_FILE_BYTES {
        return Err(GoalError::rejected("File content is too large."));
    }

    let data: Value = serde_json::from_str(text).map_err(|e| {
        log::debug!("Import parse failed: {}", e);
        GoalError::ParseFailure
    })?;

    let Value::Array(elements) = data else {
        return Err(GoalError::rejected("File must contain an array of cards."));
    };

    if elements.len() > MAX_CARDS {
        return Err(GoalError::rejected(format!(
            "File contains too many cards ({}). Maximum allowed is {}.",
            elements.len(),
            MAX_CARDS
        )));
    }

    let (cards, dropped) = cards_from_values(&elements);
    if dropped > 0 {
        log::warn!("Import dropped {} of {} element(s)", dropped, elements.len());
    }
    Ok(Imported { cards, dropped })
}

/// Read and parse an import file. The file name, size and type are checked
/// before any content is read.
pub async fn import_file(path: &Path) -> Result<Imported> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_name(&name)?;

    let metadata = tokio::fs::metadata(path).await.map_err(GoalError::Read)?;
    check_file(&FileMeta {
        name,
        size: metadata.len(),
        media_type: None,
    })?;

    let file = tokio::fs::File::open(path).await.map_err(GoalError::Read)?;
    let bytes = read_capped(file).await?;
    let text = String::from_utf8(bytes).map_err(|_| GoalError::ParseFailure)?;
    parse_document(&text)
}

/// Read at most one byte past [`MAX_FILE_BYTES`], so a file that grew after
/// its metadata was checked cannot be pulled into memory whole.
async fn read_capped<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(MAX_FILE_BYTES + 1)
        .read_to_end(&mut bytes)
        .await
        .map_err(GoalError::Read)?;
    if bytes.len() as u64 > MAX_FILE_BYTES {
        return Err(GoalError::rejected("File content is too large."));
    }
    Ok(bytes)
}

/// Serialise the valid subset of `cards` as a pretty-printed JSON array.
pub fn export_document(cards: &[GoalCard]) -> Result<Exported> {
    if cards.is_empty() {
        return Err(GoalError::NothingToExport);
    }

    let (valid, dropped) = retain_valid(cards);
    if valid.is_empty() {
        return Err(GoalError::NoValidCards);
    }
    if dropped > 0 {
        log::warn!("Export omitted {} invalid card(s)", dropped);
    }

    let contents = serde_json::to_string_pretty(&valid).map_err(|e| {
        log::error!("Failed to serialise export: {}", e);
        GoalError::persistence("Error preparing export.")
    })?;
    Ok(Exported { contents, dropped })
}
