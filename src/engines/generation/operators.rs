use crate::engines::fitness::FitnessScore;
use crate::engines::generation::sequence::Sequence;
use rand::seq::{index, SliceRandom};
use rand::Rng;

/// Tournament selection: best of `tournament_size` draws with replacement.
///
/// The earliest drawn individual wins ties.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [(Sequence, FitnessScore)],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Sequence {
    let mut best_idx = rng.gen_range(0..population.len());

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].1.is_better(&population[best_idx].1) {
            best_idx = idx;
        }
    }

    &population[best_idx].0
}

/// Two distinct indices from `0..len`, ascending. Requires `len >= 2`.
fn distinct_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, len, 2);
    let (x, y) = (picked.index(0), picked.index(1));
    (x.min(y), x.max(y))
}

/// Partially mapped crossover with random cut points.
///
/// Sequences shorter than 2 have no valid cut pair; parent1 is returned as is.
pub fn pmx_crossover<R: Rng>(parent1: &Sequence, parent2: &Sequence, rng: &mut R) -> Sequence {
    if parent1.len() < 2 {
        return parent1.clone();
    }
    let (a, b) = distinct_pair(parent1.len(), rng);
    pmx_crossover_at(parent1, parent2, a, b)
}

/// Partially mapped crossover keeping `parent1[a..b]` in place.
///
/// Values of `parent2[a..b]` that parent1's segment displaced are routed
/// through the segment mapping to a free slot; the remaining slots take
/// parent2's leftover values in parent2's order.
pub fn pmx_crossover_at(parent1: &Sequence, parent2: &Sequence, a: usize, b: usize) -> Sequence {
    let p1 = parent1.positions();
    let p2 = parent2.positions();
    let n = p1.len();
    debug_assert_eq!(n, p2.len(), "parents must have equal length");
    debug_assert!(a < b && b <= n, "invalid cut points {}..{}", a, b);

    let mut index_in_p2 = vec![0; n];
    for (i, &v) in p2.iter().enumerate() {
        index_in_p2[v] = i;
    }

    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut placed = vec![false; n];
    for i in a..b {
        child[i] = Some(p1[i]);
        placed[p1[i]] = true;
    }

    for i in a..b {
        let v2 = p2[i];
        if placed[v2] {
            continue;
        }
        let mut pos = i;
        loop {
            pos = index_in_p2[p1[pos]];
            if child[pos].is_none() {
                child[pos] = Some(v2);
                placed[v2] = true;
                break;
            }
        }
    }

    let mut leftovers = p2.iter().copied().filter(|&v| !placed[v]);
    for slot in child.iter_mut().filter(|slot| slot.is_none()) {
        *slot = leftovers.next();
    }

    let offspring = Sequence::from_positions(child.into_iter().flatten().collect());
    debug_assert!(offspring.is_permutation_of(n));
    offspring
}

/// Structural perturbations that reorder existing positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Exchange two distinct positions.
    Swap,
    /// Shuffle a random sub-range.
    Scramble,
    /// Reverse a random sub-range.
    Inversion,
}

impl MutationKind {
    pub const ALL: [MutationKind; 3] = [Self::Swap, Self::Scramble, Self::Inversion];
}

/// With probability `rate`, applies one uniformly chosen [`MutationKind`].
pub fn mutate<R: Rng>(sequence: Sequence, rate: f64, rng: &mut R) -> Sequence {
    if sequence.len() < 2 || rng.gen::<f64>() >= rate {
        return sequence;
    }
    let kind = MutationKind::ALL[rng.gen_range(0..MutationKind::ALL.len())];
    apply_mutation(sequence, kind, rng)
}

pub fn apply_mutation<R: Rng>(sequence: Sequence, kind: MutationKind, rng: &mut R) -> Sequence {
    let mut positions = sequence.into_positions();
    if positions.len() >= 2 {
        let (i, j) = distinct_pair(positions.len(), rng);
        match kind {
            MutationKind::Swap => positions.swap(i, j),
            MutationKind::Scramble => positions[i..=j].shuffle(rng),
            MutationKind::Inversion => positions[i..=j].reverse(),
        }
    }
    Sequence::from_positions(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seq(positions: &[usize]) -> Sequence {
        Sequence::from_positions(positions.to_vec())
    }

    fn scored(total: f64) -> FitnessScore {
        FitnessScore {
            total,
            ..FitnessScore::zero()
        }
    }

    #[test]
    fn test_pmx_textbook_example() {
        let p1 = seq(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let p2 = seq(&[8, 2, 6, 7, 1, 5, 4, 0, 3]);
        let child = pmx_crossover_at(&p1, &p2, 3, 7);

        assert_eq!(child.positions()[3..7], [3, 4, 5, 6]);
        // 7 chases 3 -> slot 8, 1 chases 4 -> 6 -> slot 2; the rest copy from parent2.
        assert_eq!(child.positions(), &[8, 2, 1, 3, 4, 5, 6, 0, 7]);
    }

    #[test]
    fn test_pmx_children_are_permutations_keeping_parent1_segment() {
        let mut rng = StdRng::seed_from_u64(11);
        for len in 2..24 {
            for _ in 0..20 {
                let p1 = Sequence::random(len, &mut rng);
                let p2 = Sequence::random(len, &mut rng);
                let (a, b) = distinct_pair(len, &mut rng);
                let child = pmx_crossover_at(&p1, &p2, a, b);

                assert!(child.is_permutation_of(len));
                assert_eq!(child.positions()[a..b], p1.positions()[a..b]);
                assert!(pmx_crossover(&p1, &p2, &mut rng).is_permutation_of(len));
            }
        }
    }

    #[test]
    fn test_pmx_of_identical_parents_is_the_parent() {
        let p = seq(&[3, 1, 4, 0, 2]);
        assert_eq!(pmx_crossover_at(&p, &p, 1, 4), p);
    }

    #[test]
    fn test_mutation_preserves_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        for kind in MutationKind::ALL {
            for len in 2..12 {
                let original = Sequence::random(len, &mut rng);
                let mutated = apply_mutation(original.clone(), kind, &mut rng);
                assert!(mutated.is_permutation_of(len), "{:?} broke {:?}", kind, mutated);
            }
        }
    }

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = StdRng::seed_from_u64(8);
        let original = Sequence::identity(10);
        let mutated = apply_mutation(original.clone(), MutationKind::Swap, &mut rng);
        let changed = original
            .positions()
            .iter()
            .zip(mutated.positions())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_mutation_rate_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = Sequence::identity(8);
        for _ in 0..50 {
            assert_eq!(mutate(original.clone(), 0.0, &mut rng), original);
        }
        let changed = (0..50)
            .filter(|_| mutate(original.clone(), 1.0, &mut rng) != original)
            .count();
        // A scramble may reproduce the original range, so allow a few misses.
        assert!(changed > 40);
    }

    #[test]
    fn test_short_sequences_pass_through_operators() {
        let mut rng = StdRng::seed_from_u64(2);
        let single = seq(&[0]);
        assert_eq!(pmx_crossover(&single, &single, &mut rng), single);
        assert_eq!(mutate(single.clone(), 1.0, &mut rng), single);
    }

    #[test]
    fn test_tournament_picks_best_of_full_sample() {
        let mut rng = StdRng::seed_from_u64(4);
        let population = vec![
            (seq(&[0, 1]), scored(5.0)),
            (seq(&[1, 0]), scored(1.0)),
        ];
        // A large tournament almost surely samples the better individual.
        let winner = tournament_selection(&population, 32, &mut rng);
        assert_eq!(winner, &population[1].0);

        let single = tournament_selection(&population, 1, &mut rng);
        assert!(population.iter().any(|(s, _)| s == single));
    }

    #[test]
    fn test_tournament_ties_keep_first_draw() {
        let population: Vec<(Sequence, FitnessScore)> = (0..6)
            .map(|i| (Sequence::from_positions(vec![i]), scored(2.0)))
            .collect();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = rng.clone();
            let first_draw = replay.gen_range(0..population.len());

            let winner = tournament_selection(&population, 4, &mut rng);
            assert_eq!(winner, &population[first_draw].0, "seed {}", seed);
        }
    }

    #[test]
    fn test_inversion_reverses_drawn_range() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut replay = rng.clone();
            let (i, j) = distinct_pair(10, &mut replay);

            let mutated = apply_mutation(Sequence::identity(10), MutationKind::Inversion, &mut rng);

            let mut expected: Vec<usize> = (0..10).collect();
            expected[i..=j].reverse();
            assert_eq!(mutated.positions(), &expected[..], "seed {}", seed);
        }
    }

    #[test]
    fn test_scramble_only_touches_drawn_range() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut replay = rng.clone();
        let (i, j) = distinct_pair(12, &mut replay);

        let mutated = apply_mutation(Sequence::identity(12), MutationKind::Scramble, &mut rng);
        let positions = mutated.positions();

        assert!(positions[..i].iter().enumerate().all(|(k, &v)| k == v));
        assert!(positions[j + 1..].iter().enumerate().all(|(k, &v)| k + j + 1 == v));
        let mut inside = positions[i..=j].to_vec();
        inside.sort_unstable();
        assert_eq!(inside, (i..=j).collect::<Vec<_>>());
    }
}
