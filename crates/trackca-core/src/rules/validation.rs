use crate::errors::{Result, TrackCaError};
use crate::model::{HasAutomatonCell, ItemArena};
use crate::neighborhood::WeightedNeighborhood;

use super::invariants;

/// Validate the cell states of a relaxed arena
///
/// For every usable item:
///
/// 1. The state is assigned
/// 2. The state is at least the item's weight
/// 3. No usable neighbor offers a better chain than the state
/// 4. A state above the weight is reproduced by a highest neighbor
///
/// # Errors
/// Returns the first violation as `InvariantViolation`. For exhaustive
/// reporting call `invariants::find_state_violations` directly.
pub fn validate_relaxed<T: HasAutomatonCell>(
    arena: &ItemArena<T>,
    neighborhood: &WeightedNeighborhood,
) -> Result<()> {
    match invariants::find_state_violations(arena, neighborhood).first() {
        Some(violation) => Err(TrackCaError::InvariantViolation {
            item_id: violation.item(),
            reason: violation.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::relax;
    use crate::model::{AutomatonCell, ItemId};

    #[test]
    fn test_validate_relaxed() {
        let mut arena: ItemArena<AutomatonCell> = vec![AutomatonCell::new(1.0); 2].into();
        let mut hood = WeightedNeighborhood::new(2);
        hood.insert(ItemId::new(0), 3.0, ItemId::new(1)).unwrap();

        let before = validate_relaxed(&arena, &hood);
        assert!(matches!(
            before,
            Err(TrackCaError::InvariantViolation { item_id, .. }) if item_id == ItemId::new(0)
        ));

        relax(&mut arena, &hood);
        assert_eq!(validate_relaxed(&arena, &hood), Ok(()));
    }
}
