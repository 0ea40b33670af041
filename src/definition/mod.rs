//! Definition graph: model, validation, naming and lowering
//!
//! A source file becomes a [`DefinitionGraph`], which [`validate`] turns
//! into a [`ValidatedGraph`]. [`NameTable::assign`] picks the identifiers
//! emitters use, and [`lower`] produces the runtime [`Catalog`](crate::runtime::Catalog).

mod error;
mod lower;
mod model;
pub mod names;
mod registry;
mod validator;

pub use error::SemanticError;
pub use lower::lower;
pub use model::{
    Argument, BodyPart, Definition, DefinitionKind, InsertionPoint, Parameter, Reference, Slot,
};
pub use names::{AssignedName, NameTable};
pub use registry::{DefId, DefinitionGraph};
pub use validator::{validate, Edges, ValidatedGraph};

use std::collections::HashSet;

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (m, n) = (a_chars.len(), b_chars.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Single rolling row
    let mut row: Vec<usize> = (0..=n).collect();
    for i in 1..=m {
        let mut diagonal = row[0];
        row[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            let next = (row[j] + 1).min(row[j - 1] + 1).min(diagonal + cost);
            diagonal = row[j];
            row[j] = next;
        }
    }
    row[n]
}

/// Up to three names within `max_distance` edits of `target`, closest first
fn find_similar(defined: &HashSet<String>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(String, usize)> = defined
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then(|| (name.clone(), dist))
        })
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name)
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("header", "header"), 0);
        assert_eq!(levenshtein_distance("header", "heder"), 1);
        assert_eq!(levenshtein_distance("cat", "dog"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_find_similar_sorted_and_limited() {
        let defined: HashSet<String> = ["lv1", "lv2", "lv3", "lv4", "other"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let suggestions = find_similar(&defined, "lv0", 2);
        assert_eq!(suggestions, vec!["lv1", "lv2", "lv3"]);
    }
}
