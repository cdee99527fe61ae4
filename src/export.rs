//! Read access to the classifier's export file.
//!
//! The export is a JSON array of records, each normally carrying a `categories`
//! list plus whatever other fields the classifier wrote. Records are kept as raw
//! JSON values and returned as written, key order included. The file is replaced
//! wholesale by the classifier job, so every call re-reads it from disk.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_PROMPT_LIMIT;
use crate::error::AppError;

/// One categorized prompt from the export file.
///
/// Only `categories` is looked at, and only when filtering. Any JSON value is
/// accepted so an odd record never fails the whole export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportRecord(pub Value);

impl ExportRecord {
    /// Exact, case-sensitive membership test. A record without a `categories`
    /// array never matches.
    pub fn has_category(&self, category: &str) -> bool {
        self.0
            .get("categories")
            .and_then(Value::as_array)
            .is_some_and(|categories| categories.iter().any(|c| c.as_str() == Some(category)))
    }
}

/// Raw query parameters for the prompt listing.
///
/// `limit` is kept as a string so bad input falls back to the default instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PromptQuery {
    pub category: Option<String>,
    pub limit: Option<String>,
}

impl PromptQuery {
    /// Category to filter on. An empty value means no filter.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Effective result limit.
    pub fn limit(&self) -> usize {
        match self.limit.as_deref() {
            None => DEFAULT_PROMPT_LIMIT,
            Some(raw) => parse_limit(raw).unwrap_or_else(|| {
                if !raw.trim().is_empty() {
                    tracing::debug!(limit = %raw, "Ignoring invalid limit, using default");
                }
                DEFAULT_PROMPT_LIMIT
            }),
        }
    }
}

/// Parse a limit the way a numeric coercion would: finite, non-negative values
/// are truncated to an integer, everything else is rejected.
fn parse_limit(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // Saturates at usize::MAX for huge values
    Some(value.trunc() as usize)
}

/// Keep records matching `category` (if any), in order, up to `limit`.
pub fn select(records: Vec<ExportRecord>, category: Option<&str>, limit: usize) -> Vec<ExportRecord> {
    records
        .into_iter()
        .filter(|record| category.map_or(true, |c| record.has_category(c)))
        .take(limit)
        .collect()
}

/// Handle to the export file on disk.
#[derive(Debug, Clone)]
pub struct ExportStore {
    path: Arc<PathBuf>,
}

impl ExportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Read and parse the whole export file.
    ///
    /// Returns `AppError::NotReady` when the file does not exist, including when it
    /// disappears between the existence check and the read.
    pub async fn load(&self) -> Result<Vec<ExportRecord>, AppError> {
        if !tokio::fs::try_exists(self.path.as_path()).await? {
            return Err(AppError::NotReady);
        }

        let raw = match tokio::fs::read(self.path.as_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(AppError::NotReady),
            Err(e) => return Err(e.into()),
        };

        let records: Vec<ExportRecord> = serde_json::from_slice(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = raw.len(),
            records = records.len(),
            "Loaded export file"
        );
        Ok(records)
    }

    /// Load the export and return the filtered, limited slice.
    pub async fn list_prompts(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ExportRecord>, AppError> {
        let records = self.load().await?;
        Ok(select(records, category, limit))
    }
}
