//! Candidate genomes for the two placement encodings.

use crate::grid::GridPos;

/// One gene of the permutation-and-direction encoding.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DirectionalGene {
    /// Placement priority; across a genome the ranks form a permutation.
    pub rank: usize,
    /// Resolved placement, written back during evaluation.
    pub position: GridPos,
    /// Sweep direction fraction in [0, 1]; below 0.5 sweeps along x first.
    pub direction: f32,
}

/// A candidate placement. The variant is fixed by the problem's configured
/// encoding; genomes of different variants never mix within one run.
#[derive(Debug, Clone, PartialEq)]
pub enum Genome {
    /// One explicit position per sprite.
    Cartesian(Vec<GridPos>),
    /// One directional gene per sprite; concrete positions are resolved by a
    /// directional line search at evaluation time.
    Directional(Vec<DirectionalGene>),
}

/// Order-preserving crossover for directional genomes.
///
/// The child takes the mother's genes verbatim on the inclusive segment
/// `[lo, hi]`; the remaining slots are filled in order from the father's
/// genes, skipping any rank already present in the copied segment. By
/// construction every rank appears exactly once in the child.
pub(crate) fn order_crossover(
    mother: &[DirectionalGene],
    father: &[DirectionalGene],
    child: &mut [DirectionalGene],
    lo: usize,
    hi: usize,
) {
    child[lo..=hi].copy_from_slice(&mother[lo..=hi]);
    let segment = &mother[lo..=hi];
    let mut donors = father
        .iter()
        .filter(|gene| !segment.iter().any(|kept| kept.rank == gene.rank));
    for slot in (0..lo).chain(hi + 1..child.len()) {
        child[slot] = *donors.next().expect("father genes cover the remaining slots");
    }
    debug_assert!(ranks_form_permutation(child));
}

/// Whether every rank in `0..genes.len()` appears exactly once.
pub(crate) fn ranks_form_permutation(genes: &[DirectionalGene]) -> bool {
    let mut seen = vec![false; genes.len()];
    for gene in genes {
        if gene.rank >= genes.len() || seen[gene.rank] {
            return false;
        }
        seen[gene.rank] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    // distinct direction per gene so tests can follow identity
    #[expect(clippy::cast_precision_loss)]
    fn genes(ranks: &[usize]) -> Vec<DirectionalGene> {
        ranks
            .iter()
            .map(|&rank| DirectionalGene {
                rank,
                position: GridPos::default(),
                direction: rank as f32 / 100.0,
            })
            .collect()
    }

    #[test]
    fn test_order_crossover_fills_from_father_in_order() {
        let mother = genes(&[0, 1, 2, 3, 4]);
        let father = genes(&[4, 3, 2, 1, 0]);
        let mut child = genes(&[0; 5]);

        order_crossover(&mother, &father, &mut child, 1, 2);

        // segment [1, 2] from the mother, the rest from the father in order
        let ranks: Vec<_> = child.iter().map(|gene| gene.rank).collect();
        assert_eq!(ranks, vec![4, 1, 2, 3, 0]);
        assert!(ranks_form_permutation(&child));
    }

    #[test]
    fn test_order_crossover_full_segment_copies_mother() {
        let mother = genes(&[2, 0, 1]);
        let father = genes(&[1, 2, 0]);
        let mut child = genes(&[0; 3]);

        order_crossover(&mother, &father, &mut child, 0, 2);
        assert_eq!(child, mother);
    }

    #[test]
    fn test_order_crossover_single_slot_segment() {
        let mother = genes(&[3, 1, 0, 2]);
        let father = genes(&[0, 1, 2, 3]);
        let mut child = genes(&[0; 4]);

        order_crossover(&mother, &father, &mut child, 2, 2);

        let ranks: Vec<_> = child.iter().map(|gene| gene.rank).collect();
        assert_eq!(ranks, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_ranks_form_permutation() {
        assert!(ranks_form_permutation(&genes(&[1, 0, 2])));
        assert!(!ranks_form_permutation(&genes(&[0, 0, 2])));
        assert!(!ranks_form_permutation(&genes(&[0, 1, 3])));
        assert!(ranks_form_permutation(&genes(&[])));
    }
}
