//! Contrastive anchor extraction
//!
//! Every passage gets a ranked list of *confusers*, the passages most
//! lexically similar to it by TF-IDF cosine, and a small set of *anchor
//! terms*: stems that are informative corpus-wide and rare among those
//! confusers. At query time anchors reveal whether a query singles out one
//! passage over its closest lookalikes, which a symmetric similarity score
//! cannot express.

use crate::nlp::tokenizer::unique_in_order;
use crate::types::AnchorTerm;
use crate::weights::{SparseVector, TermWeights};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

/// Rank the `confuser_k` passages most similar to each passage.
///
/// Similarity is the dot product of the unit TF-IDF vectors. Ties keep
/// ascending passage order. A passage never appears among its own confusers.
/// With `parallel` set, rows are computed on the rayon pool; the output is
/// identical either way.
pub fn find_confusers(
    vectors: &[SparseVector],
    confuser_k: usize,
    parallel: bool,
) -> Vec<Vec<usize>> {
    let n = vectors.len();
    if confuser_k == 0 {
        return vec![Vec::new(); n];
    }

    if parallel {
        (0..n)
            .into_par_iter()
            .map(|i| confusers_of(vectors, i, confuser_k))
            .collect()
    } else {
        (0..n)
            .map(|i| confusers_of(vectors, i, confuser_k))
            .collect()
    }
}

fn confusers_of(vectors: &[SparseVector], i: usize, confuser_k: usize) -> Vec<usize> {
    let target = &vectors[i];
    let mut similarities: Vec<(usize, f64)> = vectors
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(j, other)| (j, target.dot(other)))
        .collect();

    // sort_by is stable, so equal similarities stay in index order
    similarities.sort_by(|a, b| b.1.total_cmp(&a.1));
    similarities.truncate(confuser_k);
    similarities.into_iter().map(|(j, _)| j).collect()
}

/// Derive the top `anchor_k` anchor terms of every passage.
///
/// For each distinct stem `w` of passage `i`:
///
/// ```text
/// presence = |{c in confusers[i] : w in stems(c)}| / max(confuser_k, 1)
/// score    = idf(w) * (1 - presence)
/// ```
///
/// The divisor is the configured `confuser_k`, not the number of confusers
/// actually found. Anchors are ranked by descending score; ties keep the
/// stem's first-occurrence order in the passage.
pub fn extract_anchors(
    passage_stems: &[Vec<String>],
    stem_sets: &[FxHashSet<String>],
    weights: &TermWeights,
    confusers: &[Vec<usize>],
    anchor_k: usize,
    confuser_k: usize,
) -> Vec<Vec<AnchorTerm>> {
    let divisor = confuser_k.max(1) as f64;

    passage_stems
        .iter()
        .zip(confusers)
        .map(|(stems, rivals)| {
            let mut anchors: Vec<AnchorTerm> = unique_in_order(stems)
                .into_iter()
                .map(|term| {
                    let shared = rivals
                        .iter()
                        .filter(|&&c| stem_sets[c].contains(&term))
                        .count();
                    let presence = shared as f64 / divisor;
                    let score = weights.idf(&term) * (1.0 - presence);
                    AnchorTerm::new(term, score)
                })
                .collect();

            anchors.sort_by(|a, b| b.score.total_cmp(&a.score));
            anchors.truncate(anchor_k);
            anchors
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stems(passages: &[&[&str]]) -> Vec<Vec<String>> {
        passages
            .iter()
            .map(|p| p.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn sets(stems: &[Vec<String>]) -> Vec<FxHashSet<String>> {
        stems.iter().map(|s| s.iter().cloned().collect()).collect()
    }

    #[test]
    fn test_confusers_exclude_self_and_rank_by_similarity() {
        let passages = stems(&[
            &["engine", "piston", "valve"],
            &["engine", "piston", "crank"],
            &["garden", "flower"],
            &["engine", "garden"],
        ]);
        let weights = TermWeights::build(&passages);
        let confusers = find_confusers(weights.vectors(), 2, false);

        assert_eq!(confusers.len(), 4);
        for (i, list) in confusers.iter().enumerate() {
            assert!(!list.contains(&i));
            assert!(list.len() <= 2);
        }
        assert_eq!(confusers[0][0], 1);
        assert_eq!(confusers[1][0], 0);
    }

    #[test]
    fn test_confuser_ties_keep_index_order() {
        // all vectors orthogonal: every similarity is 0
        let passages = stems(&[&["alpha"], &["beta"], &["gamma"], &["delta"]]);
        let weights = TermWeights::build(&passages);
        let confusers = find_confusers(weights.vectors(), 5, false);

        assert_eq!(confusers[0], vec![1, 2, 3]);
        assert_eq!(confusers[2], vec![0, 1, 3]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let passages = stems(&[
            &["engine", "piston"],
            &["engine", "valve"],
            &["piston", "valve", "crank"],
            &["garden"],
            &["garden", "engine"],
        ]);
        let weights = TermWeights::build(&passages);
        assert_eq!(
            find_confusers(weights.vectors(), 3, false),
            find_confusers(weights.vectors(), 3, true)
        );
    }

    #[test]
    fn test_zero_confuser_k() {
        let passages = stems(&[&["alpha"], &["beta"]]);
        let weights = TermWeights::build(&passages);
        let confusers = find_confusers(weights.vectors(), 0, false);
        assert_eq!(confusers, vec![Vec::<usize>::new(), Vec::new()]);
    }

    #[test]
    fn test_anchor_scores_discount_shared_terms() {
        let passages = stems(&[
            &["engine", "piston", "turbo"],
            &["engine", "piston", "diesel"],
            &["garden", "flower"],
        ]);
        let stem_sets = sets(&passages);
        let weights = TermWeights::build(&passages);
        let confusers = vec![vec![1], vec![0], vec![0]];

        let anchors = extract_anchors(&passages, &stem_sets, &weights, &confusers, 5, 1);

        // "turbo" is unique to passage 0, "engine"/"piston" are shared with its confuser
        assert_eq!(anchors[0][0].term, "turbo");
        assert!((anchors[0][0].score - 3.0f64.ln()).abs() < 1e-12);
        let engine = anchors[0].iter().find(|a| a.term == "engine").unwrap();
        assert_eq!(engine.score, 0.0);
    }

    #[test]
    fn test_presence_divides_by_configured_k() {
        let passages = stems(&[&["alpha", "beta"], &["alpha", "gamma"], &["delta"]]);
        let stem_sets = sets(&passages);
        let weights = TermWeights::build(&passages);
        let confusers = vec![vec![1], vec![0], vec![0]];

        // one confuser found, but confuser_k = 4 => presence = 1/4
        let anchors = extract_anchors(&passages, &stem_sets, &weights, &confusers, 5, 4);
        let alpha = anchors[0].iter().find(|a| a.term == "alpha").unwrap();
        let expected = (3.0f64 / 2.0).ln() * 0.75;
        assert!((alpha.score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_anchor_k_truncates_and_ties_keep_first_occurrence() {
        let passages = stems(&[&["delta", "alpha", "gamma", "delta"], &["beta"]]);
        let stem_sets = sets(&passages);
        let weights = TermWeights::build(&passages);
        let confusers = vec![vec![1], vec![0]];

        let anchors = extract_anchors(&passages, &stem_sets, &weights, &confusers, 2, 1);
        let terms: Vec<&str> = anchors[0].iter().map(|a| a.term.as_str()).collect();
        assert_eq!(terms, vec!["delta", "alpha"]);
    }

    #[test]
    fn test_empty_passage_has_no_anchors() {
        let passages = stems(&[&[], &["alpha"]]);
        let stem_sets = sets(&passages);
        let weights = TermWeights::build(&passages);
        let confusers = find_confusers(weights.vectors(), 5, false);
        let anchors = extract_anchors(&passages, &stem_sets, &weights, &confusers, 5, 5);
        assert!(anchors[0].is_empty());
        assert_eq!(anchors[1].len(), 1);
    }
}
