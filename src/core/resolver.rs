// resolver.rs - Ambiguity handling policies for pairwise nucleotide counting

use std::str::FromStr;

use crate::data::symbol::{self, GAP, N};

/// How ambiguity codes and gaps contribute to the pair-count matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityMode {
    /// Resolve compatible ambiguities toward the paired base; distribute
    /// fractionally otherwise. Columns containing a gap are skipped.
    Resolve,
    /// Always distribute ambiguities fractionally over their possible bases.
    /// Columns containing a gap are skipped.
    Average,
    /// Like Average, but a single-sided gap is treated as N instead of
    /// skipping the column ("gap mismatch-model").
    GapMm,
    /// Count only columns where both sides are unambiguous bases.
    Skip,
}

impl AmbiguityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmbiguityMode::Resolve => "resolve",
            AmbiguityMode::Average => "average",
            AmbiguityMode::GapMm => "gapmm",
            AmbiguityMode::Skip => "skip",
        }
    }
}

impl FromStr for AmbiguityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resolve" => Ok(AmbiguityMode::Resolve),
            "average" => Ok(AmbiguityMode::Average),
            "gapmm" => Ok(AmbiguityMode::GapMm),
            "skip" => Ok(AmbiguityMode::Skip),
            _ => Err(format!(
                "Invalid ambiguity mode '{}'. Use: resolve, average, gapmm, skip",
                s
            )),
        }
    }
}

/// 4×4 nucleotide pair-count accumulator, built fresh for each sequence pair.
/// Entries are fractional because ambiguity resolution distributes weight.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairCounts {
    cells: [[f64; 4]; 4],
}

impl PairCounts {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i][j]
    }

    #[inline]
    fn add(&mut self, i: usize, j: usize, amount: f64) {
        self.cells[i][j] += amount;
    }

    /// Sum of all cells: the effective number of compared columns.
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Per-base marginal counts, each cell contributing to both its row and
    /// column base. Sums to 2 × total().
    pub fn marginals(&self) -> [f64; 4] {
        let mut counts = [0.0; 4];
        for i in 0..4 {
            for j in 0..4 {
                counts[i] += self.cells[i][j];
                counts[j] += self.cells[i][j];
            }
        }
        counts
    }
}

/// Count nucleotide pairings over one alignment column pair under `mode`.
/// Sequences of unequal length are compared over the shorter prefix.
pub fn count_pair(s1: &[u8], s2: &[u8], mode: AmbiguityMode) -> PairCounts {
    let mut counts = PairCounts::new();
    for (&c1, &c2) in s1.iter().zip(s2.iter()) {
        match mode {
            AmbiguityMode::Resolve => count_column_resolve(c1, c2, &mut counts),
            AmbiguityMode::Average => count_column_average(c1, c2, &mut counts),
            AmbiguityMode::GapMm => count_column_gapmm(c1, c2, &mut counts),
            AmbiguityMode::Skip => count_column_skip(c1, c2, &mut counts),
        }
    }
    counts
}

fn count_column_resolve(c1: u8, c2: u8, counts: &mut PairCounts) {
    if c1 == GAP && c2 == GAP {
        return;
    }
    if symbol::is_unambiguous(c1) && symbol::is_unambiguous(c2) {
        counts.add(c1 as usize, c2 as usize, 1.0);
        return;
    }
    if symbol::is_unambiguous(c1) {
        // c2 is ambiguous or a gap; a gap contributes nothing in this mode.
        if c2 == GAP {
            return;
        }
        let m2 = symbol::mask(c2);
        if m2 & (1 << c1) != 0 {
            // Compatible: resolve c2 deterministically to c1.
            counts.add(c1 as usize, c1 as usize, 1.0);
        } else {
            distribute_row(c1 as usize, m2, symbol::weight(c2), counts);
        }
    } else if symbol::is_unambiguous(c2) {
        if c1 == GAP {
            return;
        }
        let m1 = symbol::mask(c1);
        if m1 & (1 << c2) != 0 {
            counts.add(c2 as usize, c2 as usize, 1.0);
        } else {
            distribute_col(c2 as usize, m1, symbol::weight(c1), counts);
        }
    } else {
        // Both ambiguous; a gap on either side skips the column.
        if c1 == GAP || c2 == GAP {
            return;
        }
        let m1 = symbol::mask(c1);
        let m2 = symbol::mask(c2);
        let shared = m1 & m2;
        if shared != 0 {
            // Resolve to the shared bases, split evenly across them.
            let split = 1.0 / shared.count_ones() as f64;
            for b in 0..4 {
                if shared & (1 << b) != 0 {
                    counts.add(b, b, split);
                }
            }
        } else {
            distribute_outer(m1, m2, symbol::weight(c1) * symbol::weight(c2), counts);
        }
    }
}

fn count_column_average(c1: u8, c2: u8, counts: &mut PairCounts) {
    if c1 == GAP || c2 == GAP {
        return;
    }
    if symbol::is_unambiguous(c1) && symbol::is_unambiguous(c2) {
        counts.add(c1 as usize, c2 as usize, 1.0);
    } else if symbol::is_unambiguous(c1) {
        distribute_row(c1 as usize, symbol::mask(c2), symbol::weight(c2), counts);
    } else if symbol::is_unambiguous(c2) {
        distribute_col(c2 as usize, symbol::mask(c1), symbol::weight(c1), counts);
    } else {
        distribute_outer(
            symbol::mask(c1),
            symbol::mask(c2),
            symbol::weight(c1) * symbol::weight(c2),
            counts,
        );
    }
}

fn count_column_gapmm(c1: u8, c2: u8, counts: &mut PairCounts) {
    if c1 == GAP && c2 == GAP {
        return;
    }
    // A single-sided gap is scored as full ambiguity rather than skipped.
    let c1 = if c1 == GAP { N } else { c1 };
    let c2 = if c2 == GAP { N } else { c2 };
    count_column_average(c1, c2, counts);
}

fn count_column_skip(c1: u8, c2: u8, counts: &mut PairCounts) {
    if symbol::is_unambiguous(c1) && symbol::is_unambiguous(c2) {
        counts.add(c1 as usize, c2 as usize, 1.0);
    }
}

/// Spread `weight` across row `base` for each possible resolution of `mask`.
fn distribute_row(base: usize, mask: u8, weight: f64, counts: &mut PairCounts) {
    for j in 0..4 {
        if mask & (1 << j) != 0 {
            counts.add(base, j, weight);
        }
    }
}

fn distribute_col(base: usize, mask: u8, weight: f64, counts: &mut PairCounts) {
    for j in 0..4 {
        if mask & (1 << j) != 0 {
            counts.add(j, base, weight);
        }
    }
}

fn distribute_outer(m1: u8, m2: u8, weight: f64, counts: &mut PairCounts) {
    for j in 0..4 {
        if m1 & (1 << j) == 0 {
            continue;
        }
        for k in 0..4 {
            if m2 & (1 << k) != 0 {
                counts.add(j, k, weight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::symbol::encode;

    const ALL_MODES: [AmbiguityMode; 4] = [
        AmbiguityMode::Resolve,
        AmbiguityMode::Average,
        AmbiguityMode::GapMm,
        AmbiguityMode::Skip,
    ];

    fn codes(s: &str) -> Vec<u8> {
        s.bytes().map(encode).collect()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "resolve".parse::<AmbiguityMode>().unwrap(),
            AmbiguityMode::Resolve
        );
        assert_eq!(
            "GAPMM".parse::<AmbiguityMode>().unwrap(),
            AmbiguityMode::GapMm
        );
        assert!("merge".parse::<AmbiguityMode>().is_err());
    }

    #[test]
    fn test_all_modes_agree_on_unambiguous_columns() {
        let s1 = codes("ACGTAC");
        let s2 = codes("ACGATT");
        let reference = count_pair(&s1, &s2, AmbiguityMode::Resolve);
        for mode in ALL_MODES {
            assert_eq!(count_pair(&s1, &s2, mode), reference, "{:?}", mode);
        }
        assert_eq!(reference.total(), 6.0);
        assert_eq!(reference.get(0, 0), 1.0); // A-A
        assert_eq!(reference.get(3, 0), 1.0); // T vs A
        assert_eq!(reference.get(0, 3), 1.0); // A vs T
    }

    #[test]
    fn test_both_gap_column_skipped_in_every_mode() {
        let s1 = codes("A-");
        let s2 = codes("A-");
        for mode in ALL_MODES {
            let counts = count_pair(&s1, &s2, mode);
            assert_eq!(counts.total(), 1.0, "{:?}", mode);
        }
    }

    #[test]
    fn test_resolve_compatible_ambiguity_is_deterministic() {
        // R = A|G paired with A resolves fully to [A][A].
        let counts = count_pair(&codes("A"), &codes("R"), AmbiguityMode::Resolve);
        assert_eq!(counts.get(0, 0), 1.0);
        assert_eq!(counts.total(), 1.0);
    }

    #[test]
    fn test_resolve_incompatible_ambiguity_distributes() {
        // Y = C|T paired with A: no overlap, half weight to [A][C] and [A][T].
        let counts = count_pair(&codes("A"), &codes("Y"), AmbiguityMode::Resolve);
        assert_eq!(counts.get(0, 1), 0.5);
        assert_eq!(counts.get(0, 3), 0.5);
        assert_eq!(counts.get(0, 0), 0.0);
    }

    #[test]
    fn test_resolve_both_ambiguous_with_intersection() {
        // R (A|G) vs D (A|G|T): shared bases A and G, half each on diagonal.
        let counts = count_pair(&codes("R"), &codes("D"), AmbiguityMode::Resolve);
        assert_eq!(counts.get(0, 0), 0.5);
        assert_eq!(counts.get(2, 2), 0.5);
        assert_eq!(counts.total(), 1.0);
    }

    #[test]
    fn test_resolve_both_ambiguous_disjoint_falls_back_to_outer_product() {
        // R (A|G) vs Y (C|T): disjoint, each of 4 cells gets 0.25.
        let counts = count_pair(&codes("R"), &codes("Y"), AmbiguityMode::Resolve);
        for (i, j) in [(0, 1), (0, 3), (2, 1), (2, 3)] {
            assert_eq!(counts.get(i, j), 0.25);
        }
        assert_eq!(counts.total(), 1.0);
    }

    #[test]
    fn test_resolve_skips_single_gap_columns() {
        let counts = count_pair(&codes("A-"), &codes("-A"), AmbiguityMode::Resolve);
        assert_eq!(counts.total(), 0.0);
    }

    #[test]
    fn test_average_never_resolves() {
        // R vs A averages even though the codes are compatible.
        let counts = count_pair(&codes("R"), &codes("A"), AmbiguityMode::Average);
        assert_eq!(counts.get(0, 0), 0.5);
        assert_eq!(counts.get(2, 0), 0.5);
    }

    #[test]
    fn test_average_skips_gap_columns() {
        let counts = count_pair(&codes("A-C"), &codes("AAC"), AmbiguityMode::Average);
        assert_eq!(counts.total(), 2.0);
    }

    #[test]
    fn test_gapmm_scores_single_gap_as_full_ambiguity() {
        let counts = count_pair(&codes("-"), &codes("A"), AmbiguityMode::GapMm);
        // Gap remapped to N, averaged over the column: 0.25 per [b][A].
        for b in 0..4 {
            assert_eq!(counts.get(b, 0), 0.25);
        }
        assert_eq!(counts.total(), 1.0);
    }

    #[test]
    fn test_skip_ignores_any_ambiguity_or_gap() {
        // Deleting the offending column must give identical counts.
        let with_col = count_pair(&codes("ACRT"), &codes("ACGT"), AmbiguityMode::Skip);
        let without = count_pair(&codes("ACT"), &codes("ACT"), AmbiguityMode::Skip);
        assert_eq!(with_col, without);

        let gapped = count_pair(&codes("AC-T"), &codes("ACGT"), AmbiguityMode::Skip);
        assert_eq!(gapped, without);
    }

    #[test]
    fn test_marginals_double_count_each_column() {
        let counts = count_pair(&codes("ACGT"), &codes("ACGA"), AmbiguityMode::Resolve);
        let marginals = counts.marginals();
        assert_eq!(marginals.iter().sum::<f64>(), 2.0 * counts.total());
        assert_eq!(marginals[0], 3.0); // A: one diagonal + T-vs-A column
        assert_eq!(marginals[3], 1.0);
    }
}
