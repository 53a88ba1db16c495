use super::Layering;
use super::cross_count::crossings_around;
use crate::model::LayoutGraph;

/// Adjacent-swap local search.
///
/// A swap is kept when it does not increase the crossings on either side of its rank. Only a
/// strict decrease counts as progress, so the sweep repeats until a full pass over every rank
/// finds nothing better.
pub fn transpose(g: &LayoutGraph, layering: &mut Layering) {
    let mut improved = true;
    while improved {
        improved = false;
        for r in 0..layering.len() {
            for i in 0..layering[r].len().saturating_sub(1) {
                let before = crossings_around(g, layering, r);
                layering[r].swap(i, i + 1);
                let after = crossings_around(g, layering, r);
                if after > before {
                    layering[r].swap(i, i + 1);
                } else if after < before {
                    improved = true;
                }
            }
        }
    }
}
