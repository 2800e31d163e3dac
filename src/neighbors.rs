//! Positional neighborhoods
//!
//! Passages are assumed to arrive in document order, so the passages within a
//! small window around a passage are its local context. An optional cluster
//! labelling restricts the window to passages of the same cluster (e.g. the
//! same section). Neighborhoods only corroborate a candidate at query time;
//! they are unrelated to confusers.

/// Neighbor lists for `n` passages.
///
/// Passage `i`'s neighbors are every `j != i` with `|i - j| <= radius`, in
/// ascending order, clipped to `0..n`. When `cluster_labels` is given (one
/// label per passage), only `j` with `cluster_labels[j] == cluster_labels[i]`
/// are kept. Passages past the end of a short label slice count as
/// unlabelled and share one cluster.
pub fn build_neighbors<L: PartialEq>(
    n: usize,
    radius: usize,
    cluster_labels: Option<&[L]>,
) -> Vec<Vec<usize>> {
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = i.saturating_add(radius).min(n.saturating_sub(1));
            (lo..=hi)
                .filter(|&j| j != i)
                .filter(|&j| match cluster_labels {
                    Some(labels) => labels.get(j) == labels.get(i),
                    None => true,
                })
                .collect()
        })
        .collect()
}
