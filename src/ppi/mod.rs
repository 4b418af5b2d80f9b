mod dataset;
mod error;
mod export;
mod graph;
mod links;
mod parse;
mod query;
mod source;

pub use dataset::{
    Dataset, DatasetCache, InteractionRow, LoadedDataset, load, load_uncached, settle_with_failure,
};
pub use error::LoadError;
pub use export::to_csv_bytes;
pub use graph::{EdgeRecord, InteractionGraph, PairKey, build, distance_for};
pub use links::{DATA_EDIT_URL, matching_proteins, uniprot_url};
pub use query::{FilteredResult, Query, filter, split_protein_list};
pub use source::{DEFAULT_SOURCE, DataSource};
