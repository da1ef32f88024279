//! Conversion pipeline with explicit stages.
//!
//! 1. **Extract**: load the profile document from a file or archive
//! 2. **Convert**: decode and project each dataset's embedded schema
//! 3. **Emit**: hand each projected schema to the configured sink
//!
//! Extraction, decoding and projection failures abort the run. Emit
//! failures are logged and the next dataset is processed.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, info_span};

use p2s_arrow::convert_dataset;
use p2s_ingest::extract_profile;
use p2s_model::ProfileDocument;
use p2s_output::{SchemaSink, open_sink};

/// Counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Descriptors in the profile document.
    pub datasets: usize,
    /// Schemas handed to the sink successfully.
    pub emitted: usize,
    /// Descriptors without an embedded schema.
    pub skipped: usize,
    /// Schemas the sink failed to write.
    pub failed_outputs: usize,
}

/// Convert every dataset of the profile at `input`.
///
/// Schemas are printed to standard output unless `output_dir` is given.
pub fn run_conversion(input: &Path, output_dir: Option<&Path>) -> Result<RunSummary> {
    let run_span = info_span!("run", input = %input.display());
    let _run_guard = run_span.enter();

    let document =
        extract_profile(input).with_context(|| format!("load profile {}", input.display()))?;
    let mut sink = open_sink(output_dir).context("prepare output")?;
    convert_profile(&document, sink.as_mut())
}

/// Convert the datasets of an already loaded document, in document order.
pub fn convert_profile(
    document: &ProfileDocument,
    sink: &mut dyn SchemaSink,
) -> Result<RunSummary> {
    let mut summary = RunSummary {
        datasets: document.datasets().len(),
        ..RunSummary::default()
    };

    for (index, dataset) in document.datasets().iter().enumerate() {
        let converted = convert_dataset(index, dataset).map_err(|e| {
            let stage = if e.is_decode_error() {
                "decode"
            } else {
                "project"
            };
            anyhow::Error::new(e).context(format!(
                "failed to {stage} schema for dataset {}",
                dataset.display_name(index)
            ))
        })?;
        let Some(output) = converted else {
            debug!(dataset = %dataset.display_name(index), "no batch schema, skipping");
            summary.skipped += 1;
            continue;
        };

        match sink.emit(&output.dataset_path, &output.schema) {
            Ok(()) => summary.emitted += 1,
            Err(err) => {
                error!(dataset = %output.dataset_path, error = %err, "unable to write schema");
                summary.failed_outputs += 1;
            }
        }
    }

    info!(
        datasets = summary.datasets,
        emitted = summary.emitted,
        skipped = summary.skipped,
        failed_outputs = summary.failed_outputs,
        "conversion finished"
    );
    Ok(summary)
}
