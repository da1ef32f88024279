//! Profile document and dataset descriptors.
//!
//! Parsing is tolerant: unknown keys are ignored and absent keys leave the
//! corresponding attribute unset.

use serde::{Deserialize, Serialize};

/// Top-level profile document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    /// Dataset descriptors in document order. `None` when the key is absent or null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_profile: Option<Vec<DatasetProfile>>,
}

impl ProfileDocument {
    /// Create a document from a list of descriptors.
    #[must_use]
    pub fn new(datasets: Vec<DatasetProfile>) -> Self {
        Self {
            dataset_profile: Some(datasets),
        }
    }

    /// Dataset descriptors in document order (empty when none were recorded).
    pub fn datasets(&self) -> &[DatasetProfile] {
        self.dataset_profile.as_deref().unwrap_or_default()
    }

    /// Number of descriptors that carry an embedded schema.
    pub fn schema_count(&self) -> usize {
        self.datasets().iter().filter(|d| d.has_schema()).count()
    }
}

/// One dataset's recorded metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<i64>,
    /// Base64-encoded binary schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_approx_stats: Option<bool>,
}

impl DatasetProfile {
    /// Descriptor with a path and an encoded schema.
    pub fn with_schema(path: impl Into<String>, batch_schema: impl Into<String>) -> Self {
        Self {
            dataset_path: Some(path.into()),
            batch_schema: Some(batch_schema.into()),
            ..Self::default()
        }
    }

    /// True when the descriptor embeds a schema to emit.
    pub fn has_schema(&self) -> bool {
        self.batch_schema.is_some()
    }

    /// Output name: the dataset path, or `dataset-<index>` when none was recorded.
    pub fn display_name(&self, index: usize) -> String {
        match &self.dataset_path {
            Some(path) => path.clone(),
            None => format!("dataset-{index}"),
        }
    }
}
