use anyhow::{Context, Result};
use csv::WriterBuilder;

use super::query::FilteredResult;

/// CSV bytes of a filtered result: the dataset's (trimmed) header row followed
/// by each kept row's original cells.
pub fn to_csv_bytes(headers: &[String], rows: &FilteredResult<'_>) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(headers)
        .context("failed to write CSV header")?;
    for row in rows.iter() {
        let context = || format!("failed to write row {} / {}", row.protein_a, row.protein_b);
        writer.write_record(&row.fields).with_context(context)?;
    }

    writer
        .into_inner()
        .map_err(|error| anyhow::anyhow!("failed to flush CSV export: {}", error.error()))
}
