// distance.rs - TN93 / K2P distance from a pair-count matrix

use crate::core::resolver::PairCounts;
use crate::data::symbol::{A, C, G, T};

/// Distance reported when the substitution model breaks down (a logarithm
/// argument goes non-positive at saturated divergence), or when a pair shares
/// no comparable columns at all. Finite so that a degenerate pair never
/// aborts a run; large enough that no sane edge threshold keeps it.
pub const SATURATION_DISTANCE: f64 = 1000.0;

/// Evolutionary distance for one completed pair-count matrix.
///
/// Uses the full Tamura-Nei 93 model when all four marginal base frequencies
/// are positive, and the Kimura 2-parameter model (pooled transition rate)
/// otherwise. The result is clamped to be non-negative: floating-point noise
/// on near-identical sequences must not produce a small negative distance.
pub fn pairwise_distance(counts: &PairCounts) -> f64 {
    let total = counts.total();
    if total == 0.0 {
        // No comparable columns (e.g. disjoint gap patterns).
        return SATURATION_DISTANCE;
    }

    let marginals = counts.marginals();
    let mut freq = [0.0; 4];
    for b in 0..4 {
        freq[b] = marginals[b] / (2.0 * total);
    }

    let (a, c, g, t) = (A as usize, C as usize, G as usize, T as usize);
    let p_ag = (counts.get(a, g) + counts.get(g, a)) / total;
    let p_ct = (counts.get(c, t) + counts.get(t, c)) / total;
    let matching =
        (counts.get(a, a) + counts.get(c, c) + counts.get(g, g) + counts.get(t, t)) / total;
    // Transversion proportion: everything that is neither a match nor a
    // same-class transition.
    let q = 1.0 - p_ag - p_ct - matching;

    let dist = if freq.iter().any(|&f| f == 0.0) {
        k2p_distance(p_ag + p_ct, q)
    } else {
        tn93_distance(&freq, p_ag, p_ct, q)
    };

    // `f64::max(-0.0, 0.0)` may return -0.0, which formats as "-0.000000";
    // clamp explicitly so zero is always the positive representation.
    if dist > 0.0 {
        dist
    } else {
        0.0
    }
}

/// Kimura 2-parameter fallback for degenerate base compositions.
fn k2p_distance(p: f64, q: f64) -> f64 {
    let l1 = 1.0 - 2.0 * p - q;
    let l2 = 1.0 - 2.0 * q;
    if l1 > 0.0 && l2 > 0.0 {
        -0.5 * l1.ln() - 0.25 * l2.ln()
    } else {
        SATURATION_DISTANCE
    }
}

/// Full TN93 with purine/pyrimidine-specific transition rates.
fn tn93_distance(freq: &[f64; 4], p_ag: f64, p_ct: f64, q: f64) -> f64 {
    let (a, c, g, t) = (A as usize, C as usize, G as usize, T as usize);
    let g_r = freq[a] + freq[g];
    let g_y = freq[c] + freq[t];

    let k_ag = freq[a] * freq[g] / g_r;
    let k_ct = freq[c] * freq[t] / g_y;
    let k_ry = g_r * g_y;

    let l_ag = 1.0 - p_ag / (2.0 * k_ag) - q / (2.0 * g_r);
    let l_ct = 1.0 - p_ct / (2.0 * k_ct) - q / (2.0 * g_y);
    let l_ry = 1.0 - q / (2.0 * k_ry);

    if l_ag > 0.0 && l_ct > 0.0 && l_ry > 0.0 {
        -2.0 * k_ag * l_ag.ln()
            - 2.0 * k_ct * l_ct.ln()
            - 2.0 * (k_ry - k_ag * g_y - k_ct * g_r) * l_ry.ln()
    } else {
        SATURATION_DISTANCE
    }
}
