use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use super::LoadError;
use super::dataset::{Dataset, InteractionRow};

pub const PROTEIN_A_COLUMN: &str = "Protein_A";
pub const PROTEIN_B_COLUMN: &str = "Protein_B";
pub const SCORE_COLUMN: &str = "combined_score";

#[derive(Clone, Debug, Deserialize)]
struct RawInteraction {
    #[serde(rename = "Protein_A")]
    protein_a: String,
    #[serde(rename = "Protein_B")]
    protein_b: String,
    #[serde(
        default,
        rename = "combined_score",
        deserialize_with = "csv::invalid_option"
    )]
    combined_score: Option<f64>,
}

pub(super) fn parse_interactions(raw: &[u8]) -> Result<Dataset, LoadError> {
    let text = std::str::from_utf8(raw)?;
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for required in [PROTEIN_A_COLUMN, PROTEIN_B_COLUMN] {
        if !headers.iter().any(|name| name == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(row_from_record(&record, &headers)?);
    }

    let headers = headers.iter().map(str::to_owned).collect();
    Ok(Dataset::new(headers, rows))
}

fn row_from_record(
    record: &StringRecord,
    headers: &StringRecord,
) -> Result<InteractionRow, LoadError> {
    let raw: RawInteraction = record.deserialize(Some(headers))?;
    Ok(InteractionRow {
        protein_a: raw.protein_a.trim().to_owned(),
        protein_b: raw.protein_b.trim().to_owned(),
        score: raw.combined_score.filter(|score| score.is_finite()),
        fields: record.iter().map(str::to_owned).collect(),
    })
}
