//! Deterministic partitioning of card combinations.
//!
//! Build creation and staging finalize both ask the same question: can
//! this set of cards be divided into groups that each sum exactly to
//! the declared value, using every card? A single group means a plain
//! sum build (still extendable); multiple groups mean a doubled build
//! locked at its value.
//!
//! ## The rule
//!
//! The search is first-fit backtracking over the cards in their stored
//! (chronological) order: each card is placed into the earliest open
//! group it fits, a new group is opened only when no existing group
//! fits, and the search backtracks on dead ends. The first solution in
//! that order is the answer, so the grouping is reproducible for any
//! input; there is no dependence on hash order or randomness.

use crate::core::card::Card;

/// Partition `cards` into groups each summing exactly to `target`,
/// using every card. Returns the groups (cards keep their input
/// order within and across groups), or `None` if no partition exists.
#[must_use]
pub fn partition_into_sums(cards: &[Card], target: u8) -> Option<Vec<Vec<Card>>> {
    if cards.is_empty() || target == 0 {
        return None;
    }

    let values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    let total: u32 = values.iter().map(|v| u32::from(*v)).sum();
    if total % u32::from(target) != 0 {
        return None;
    }

    let mut groups: Vec<(Vec<usize>, u8)> = Vec::new();
    if !place(&values, 0, target, &mut groups) {
        return None;
    }

    Some(
        groups
            .into_iter()
            .map(|(indices, _)| indices.into_iter().map(|i| cards[i]).collect())
            .collect(),
    )
}

/// Number of groups in the deterministic partition, if one exists.
#[must_use]
pub fn partition_group_count(cards: &[Card], target: u8) -> Option<usize> {
    partition_into_sums(cards, target).map(|groups| groups.len())
}

fn place(values: &[u8], idx: usize, target: u8, groups: &mut Vec<(Vec<usize>, u8)>) -> bool {
    if idx == values.len() {
        return groups.iter().all(|(_, sum)| *sum == target);
    }

    let value = values[idx];

    // Earliest open group first keeps the result deterministic.
    for gi in 0..groups.len() {
        if groups[gi].1 + value <= target {
            groups[gi].0.push(idx);
            groups[gi].1 += value;
            if place(values, idx + 1, target, groups) {
                return true;
            }
            groups[gi].0.pop();
            groups[gi].1 -= value;
        }
    }

    if value <= target {
        groups.push((vec![idx], value));
        if place(values, idx + 1, target, groups) {
            return true;
        }
        groups.pop();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        // Suits cycle so duplicate ranks stay distinct cards.
        ranks
            .iter()
            .zip(Suit::ALL.iter().cycle())
            .map(|(rank, suit)| Card::new(*rank, *suit))
            .collect()
    }

    fn values(groups: &[Vec<Card>]) -> Vec<Vec<u8>> {
        groups
            .iter()
            .map(|g| g.iter().map(|c| c.value()).collect())
            .collect()
    }

    #[test]
    fn test_single_group_sum() {
        let input = cards(&[Rank::Four, Rank::Four]);
        let groups = partition_into_sums(&input, 8).unwrap();
        assert_eq!(values(&groups), vec![vec![4, 4]]);
    }

    #[test]
    fn test_pairing_splits_into_groups() {
        let input = cards(&[Rank::Four, Rank::Four]);
        let groups = partition_into_sums(&input, 4).unwrap();
        assert_eq!(values(&groups), vec![vec![4], vec![4]]);
    }

    #[test]
    fn test_mixed_groups() {
        let input = cards(&[Rank::Three, Rank::Five, Rank::Eight]);
        let groups = partition_into_sums(&input, 8).unwrap();
        assert_eq!(values(&groups), vec![vec![3, 5], vec![8]]);
    }

    #[test]
    fn test_backtracking_required() {
        // [4,2,6,4] at 8: greedy first-fit closes 4+2 and strands the
        // 6; the search has to retreat and pair 2 with 6 instead.
        let input = cards(&[Rank::Four, Rank::Two, Rank::Six, Rank::Four]);
        let groups = partition_into_sums(&input, 8).unwrap();

        assert_eq!(groups.len(), 2);
        for group in &groups {
            let sum: u8 = group.iter().map(|c| c.value()).sum();
            assert_eq!(sum, 8);
        }
    }

    #[test]
    fn test_no_partition() {
        assert!(partition_into_sums(&cards(&[Rank::Two, Rank::Three]), 6).is_none());
        assert!(partition_into_sums(&cards(&[Rank::Ten, Rank::Three]), 10).is_none());
        // Divisible total but no valid grouping.
        assert!(partition_into_sums(&cards(&[Rank::Seven, Rank::Seven]), 2).is_none());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(partition_into_sums(&[], 8).is_none());
        assert!(partition_into_sums(&cards(&[Rank::Four]), 0).is_none());
        // Single card at its own value is one group.
        let groups = partition_into_sums(&cards(&[Rank::Ten]), 10).unwrap();
        assert_eq!(values(&groups), vec![vec![10]]);
    }

    #[test]
    fn test_deterministic_grouping() {
        let input = cards(&[Rank::Two, Rank::Six, Rank::Three, Rank::Five]);
        let a = partition_into_sums(&input, 8).unwrap();
        let b = partition_into_sums(&input, 8).unwrap();

        assert_eq!(a, b);
        assert_eq!(values(&a), vec![vec![2, 6], vec![3, 5]]);
    }

    #[test]
    fn test_group_count() {
        assert_eq!(
            partition_group_count(&cards(&[Rank::Four, Rank::Four]), 8),
            Some(1)
        );
        assert_eq!(
            partition_group_count(&cards(&[Rank::Four, Rank::Four]), 4),
            Some(2)
        );
        assert_eq!(partition_group_count(&cards(&[Rank::Two]), 8), None);
    }

    #[test]
    fn test_exhaustive_small_cases() {
        // For two cards a partition exists exactly when the pair sums
        // to the target, or both cards match it individually. Check
        // every combination against that oracle.
        let ranks = [Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five];
        for a in ranks {
            for b in ranks {
                let input = vec![
                    Card::new(a, Suit::Clubs),
                    Card::new(b, Suit::Hearts),
                ];
                for target in 1..=10u8 {
                    let got = partition_into_sums(&input, target).is_some();
                    let expect = a.value() + b.value() == target
                        || (a.value() == target && b.value() == target);
                    assert_eq!(
                        got, expect,
                        "[{}, {}] target {target}",
                        a.value(),
                        b.value()
                    );
                }
            }
        }
    }
}
