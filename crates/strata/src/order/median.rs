use super::Layering;
use crate::model::LayoutGraph;
use rustc_hash::FxHashMap;
use strata_graph::NodeIx;

/// Median of sorted neighbour positions. `None` means "no neighbours, keep the current slot".
///
/// With an even count above two, the result leans toward the side whose positions are packed
/// more tightly.
pub fn median_value(positions: &[usize]) -> Option<f64> {
    match *positions {
        [] => None,
        [p] => Some(p as f64),
        [a, b] => Some((a + b) as f64 / 2.0),
        _ if positions.len() % 2 == 1 => Some(positions[positions.len() / 2] as f64),
        _ => {
            let m = positions.len() / 2;
            let (lo, hi) = (positions[m - 1] as f64, positions[m] as f64);
            let left = lo - positions[0] as f64;
            let right = positions[positions.len() - 1] as f64 - hi;
            if left + right == 0.0 {
                Some((lo + hi) / 2.0)
            } else {
                Some((lo * right + hi * left) / (left + right))
            }
        }
    }
}

/// Weighted-median sweep from rank 1 upward, applied on even iterations only.
///
/// Each rank is reordered against the rank below it. Nodes without neighbours there keep their
/// slot; the others fill the remaining slots by median, ties keeping their current order.
pub fn wmedian(g: &LayoutGraph, layering: &mut Layering, iteration: usize) {
    if iteration % 2 != 0 {
        return;
    }
    for r in 1..layering.len() {
        let (lower, upper) = layering.split_at_mut(r);
        let (Some(below), Some(layer)) = (lower.last(), upper.first_mut()) else {
            continue;
        };
        let below_pos: FxHashMap<NodeIx, usize> =
            below.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        reorder_by_median(g, layer, &below_pos);
    }
}

fn reorder_by_median(g: &LayoutGraph, layer: &mut Vec<NodeIx>, below_pos: &FxHashMap<NodeIx, usize>) {
    let medians: Vec<Option<f64>> = layer
        .iter()
        .map(|&v| {
            let mut positions: Vec<usize> = g
                .successors(v)
                .filter_map(|w| below_pos.get(&w).copied())
                .collect();
            positions.sort_unstable();
            median_value(&positions)
        })
        .collect();

    let mut movable: Vec<(f64, usize)> = medians
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.map(|m| (m, i)))
        .collect();
    movable.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    let mut movable = movable.into_iter();

    let reordered: Vec<NodeIx> = medians
        .iter()
        .enumerate()
        .filter_map(|(i, m)| match m {
            None => Some(layer[i]),
            Some(_) => movable.next().map(|(_, j)| layer[j]),
        })
        .collect();
    *layer = reordered;
}
