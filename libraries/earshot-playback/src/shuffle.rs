//! Shuffle selection
//!
//! Picks the next queue position while shuffle mode is on.

use rand::Rng;

/// Pick a random queue index different from `current`
///
/// Returns `None` when no other index exists (fewer than two items).
pub fn pick_next_index<R: Rng + ?Sized>(rng: &mut R, len: usize, current: usize) -> Option<usize> {
    if len < 2 {
        return None;
    }

    // Draw from the len - 1 other slots and skip over `current`
    let drawn = rng.gen_range(0..len - 1);
    Some(if drawn >= current { drawn + 1 } else { drawn })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn never_picks_current() {
        let mut rng = StdRng::seed_from_u64(7);
        for current in 0..5 {
            for _ in 0..200 {
                let next = pick_next_index(&mut rng, 5, current).unwrap();
                assert_ne!(next, current);
                assert!(next < 5);
            }
        }
    }

    #[test]
    fn covers_every_other_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<usize> = (0..500)
            .filter_map(|_| pick_next_index(&mut rng, 4, 2))
            .collect();

        assert_eq!(seen, HashSet::from([0, 1, 3]));
    }

    #[test]
    fn single_item_has_no_candidate() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_next_index(&mut rng, 1, 0), None);
        assert_eq!(pick_next_index(&mut rng, 0, 0), None);
    }

    #[test]
    fn two_items_alternate() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_next_index(&mut rng, 2, 0), Some(1));
        assert_eq!(pick_next_index(&mut rng, 2, 1), Some(0));
    }
}
