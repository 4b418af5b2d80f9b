use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

pub const DATA_EDIT_URL: &str =
    "https://github.com/jahnaviP05/protein-protein-database/edit/main/cleaned_interactions.csv";

pub fn uniprot_url(protein: &str) -> String {
    format!("https://www.uniprot.org/uniprotkb/?query={protein}&sort=score")
}

/// Proteins whose id fuzzily matches `term`, best match first. A blank term
/// returns every protein in its original order.
pub fn matching_proteins<'a>(proteins: &[&'a str], term: &str) -> Vec<&'a str> {
    let term = term.trim();
    if term.is_empty() {
        return proteins.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored = proteins
        .iter()
        .filter_map(|protein| {
            matcher
                .fuzzy_match(protein, term)
                .map(|score| (score, *protein))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.into_iter().map(|(_, protein)| protein).collect()
}
