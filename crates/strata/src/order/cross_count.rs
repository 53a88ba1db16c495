use crate::model::LayoutGraph;
use rustc_hash::FxHashMap;
use strata_graph::NodeIx;

/// Total crossings of a layering indexed by rank.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<NodeIx>]) -> usize {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[1], &pair[0]))
        .sum()
}

/// Crossings between the edges leaving `north` (rank `r + 1`) and ending in `south` (rank `r`).
///
/// Edge endpoints in `south` are visited in north order, sorted within each north node, and fed
/// into an accumulator tree over south positions; every earlier entry to the right of the new one
/// is a crossing. Runs in `O(E log V)`.
pub fn two_layer_cross_count(g: &LayoutGraph, north: &[NodeIx], south: &[NodeIx]) -> usize {
    if south.is_empty() {
        return 0;
    }
    let south_pos: FxHashMap<NodeIx, usize> =
        south.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let mut entries: Vec<usize> = Vec::new();
    for &v in north {
        let start = entries.len();
        entries.extend(
            g.successors(v)
                .filter_map(|w| south_pos.get(&w).copied()),
        );
        entries[start..].sort_unstable();
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree = vec![0usize; tree_size];

    let mut crossings = 0;
    for pos in entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut weight_sum = 0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        crossings += weight_sum;
    }
    crossings
}

/// Crossings on both sides of rank `r`.
pub fn crossings_around(g: &LayoutGraph, layering: &[Vec<NodeIx>], r: usize) -> usize {
    let mut total = 0;
    if r > 0 {
        total += two_layer_cross_count(g, &layering[r], &layering[r - 1]);
    }
    if r + 1 < layering.len() {
        total += two_layer_cross_count(g, &layering[r + 1], &layering[r]);
    }
    total
}
