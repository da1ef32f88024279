//! Dataset-level conversion: descriptor in, output schema out.

use tracing::{debug, info_span};

use p2s_model::{DatasetProfile, OutputSchema};

use crate::decode::decode_schema_base64;
use crate::error::Result;
use crate::project::project_schema;

/// Decode and project the schema embedded in a dataset descriptor.
///
/// Returns `Ok(None)` when the descriptor carries no schema. `index` is the
/// descriptor's position in the document, used to name descriptors without a
/// dataset path.
pub fn convert_dataset(index: usize, dataset: &DatasetProfile) -> Result<Option<OutputSchema>> {
    let Some(encoded) = dataset.batch_schema.as_deref() else {
        return Ok(None);
    };
    let dataset_path = dataset.display_name(index);
    let span = info_span!("dataset", path = %dataset_path);
    let _guard = span.enter();

    let tree = decode_schema_base64(encoded)?;
    let schema = project_schema(&tree)?;
    debug!(fields = schema.fields.len(), "projected schema");
    Ok(Some(OutputSchema {
        dataset_path,
        schema,
    }))
}
