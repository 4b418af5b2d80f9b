use std::collections::BTreeSet;

use super::dataset::{Dataset, InteractionRow};

/// Filter predicate over the interaction table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Query {
    #[default]
    Empty,
    SingleProtein(String),
    /// Never empty; entries are trimmed and deduplicated.
    ProteinSet(BTreeSet<String>),
}

impl Query {
    /// Builds a query from the two search boxes. A non-empty protein list
    /// replaces the single-protein search rather than combining with it.
    pub fn from_inputs(single: &str, multi: &str) -> Self {
        let proteins = split_protein_list(multi);
        if !proteins.is_empty() {
            return Self::ProteinSet(proteins);
        }

        let single = single.trim();
        if single.is_empty() {
            Self::Empty
        } else {
            Self::SingleProtein(single.to_owned())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn matches(&self, row: &InteractionRow) -> bool {
        match self {
            Self::Empty => true,
            Self::SingleProtein(protein) => row.involves(protein),
            Self::ProteinSet(proteins) => {
                proteins.contains(&row.protein_a) || proteins.contains(&row.protein_b)
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Empty => "all interactions".to_owned(),
            Self::SingleProtein(protein) => format!("protein {protein}"),
            Self::ProteinSet(proteins) => {
                let names = proteins.iter().map(String::as_str).collect::<Vec<_>>();
                format!("proteins {}", names.join(", "))
            }
        }
    }
}

pub fn split_protein_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Rows of the dataset that satisfy a query, borrowed in dataset order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredResult<'a> {
    rows: Vec<&'a InteractionRow>,
}

impl<'a> FilteredResult<'a> {
    pub fn rows(&self) -> &[&'a InteractionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a InteractionRow> + '_ {
        self.rows.iter().copied()
    }

    /// Sorted, distinct protein ids appearing on either side of a row.
    pub fn proteins(&self) -> Vec<&'a str> {
        self.iter()
            .flat_map(|row| [row.protein_a.as_str(), row.protein_b.as_str()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> FromIterator<&'a InteractionRow> for FilteredResult<'a> {
    fn from_iter<I: IntoIterator<Item = &'a InteractionRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

pub fn filter<'a>(dataset: &'a Dataset, query: &Query) -> FilteredResult<'a> {
    dataset
        .rows()
        .iter()
        .filter(|row| query.matches(row))
        .collect()
}
