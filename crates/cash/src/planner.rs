//! Disbursement planning.
//!
//! Pure computation over an inventory snapshot: nothing here mutates stock,
//! so a rejected plan needs no rollback.
//!
//! With the standard note set the rules are:
//! - amounts ending in 0 reserve up to two 5-notes, keeping small notes
//!   flowing so later odd withdrawals stay possible;
//! - amounts ending in 5 must use exactly one reserved 5-note, and fail if
//!   the machine has none;
//! - the rest is allocated greedily from the largest note down, and any
//!   leftover is topped up with further 5-notes.
//!
//! "5" and "10" generalize to the smallest configured note and twice that.
//! Greedy exhaustion fails fast; there is no backtracking search.

use crate::config::MachineConfig;
use crate::disbursement::Disbursement;
use crate::error::UnservableReason;
use crate::inventory::Inventory;

/// Most small notes reserved for an even amount.
pub const SMALL_NOTE_RESERVE: u32 = 2;

/// Compute the notes to pay out `amount` from `inventory`.
pub fn plan(
    amount: u32,
    inventory: &Inventory,
    config: &MachineConfig,
) -> Result<Disbursement, UnservableReason> {
    let smallest = config.smallest_denomination();
    if amount % smallest != 0 {
        return Err(UnservableReason::NotMultipleOfSmallestNote { smallest });
    }

    let small_on_hand = inventory.count(smallest);
    let reserved = if amount % (smallest * 2) == 0 {
        small_on_hand.min(SMALL_NOTE_RESERVE).min(amount / smallest)
    } else {
        if small_on_hand == 0 {
            return Err(UnservableReason::NoSmallNoteAvailable { smallest });
        }
        1
    };

    let mut plan = Disbursement::new();
    let mut remaining = amount - reserved * smallest;

    for &denomination in config.denominations().iter().skip(1).rev() {
        remaining = take_greedy(&mut plan, remaining, denomination, inventory.count(denomination));
    }

    let top_up = (remaining / smallest).min(small_on_hand - reserved);
    remaining -= top_up * smallest;

    if remaining != 0 {
        return Err(UnservableReason::InventoryShortfall { remaining });
    }

    plan.add(smallest, reserved + top_up);
    Ok(plan)
}

fn take_greedy(plan: &mut Disbursement, remaining: u32, denomination: u32, on_hand: u32) -> u32 {
    let taken = (remaining / denomination).min(on_hand);
    plan.add(denomination, taken);
    remaining - taken * denomination
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_DENOMINATION;
    use proptest::prelude::*;

    fn stocked(notes: &[(u32, u32)]) -> Inventory {
        let mut inventory = Inventory::new();
        for &(d, c) in notes {
            inventory.add(d, c);
        }
        inventory
    }

    fn full_machine() -> Inventory {
        stocked(&[(5, 3000), (10, 1000), (20, 2000), (50, 1000)])
    }

    fn notes(pairs: &[(u32, u32)]) -> Disbursement {
        pairs.iter().copied().collect()
    }

    #[test]
    fn odd_amount_uses_exactly_one_small_note() {
        let plan = plan(245, &full_machine(), &MachineConfig::default()).unwrap();
        assert_eq!(plan, notes(&[(50, 4), (20, 2), (5, 1)]));
    }

    #[test]
    fn even_amount_reserves_two_small_notes() {
        let config = MachineConfig::default();
        assert_eq!(plan(20, &full_machine(), &config).unwrap(), notes(&[(5, 2), (10, 1)]));
        assert_eq!(plan(100, &full_machine(), &config).unwrap(), notes(&[(5, 2), (50, 1), (20, 2)]));
    }

    #[test]
    fn even_amount_without_small_notes_goes_greedy() {
        let inventory = stocked(&[(10, 10), (20, 10), (50, 10)]);
        assert_eq!(
            plan(20, &inventory, &MachineConfig::default()).unwrap(),
            notes(&[(20, 1)])
        );
    }

    #[test]
    fn lone_small_note_on_even_amount_strands_remainder() {
        // One 5 reserved, 50 taken, and the last 5 has nothing to cover it.
        let inventory = stocked(&[(5, 1), (10, 10), (20, 10), (50, 10)]);
        assert_eq!(
            plan(60, &inventory, &MachineConfig::default()),
            Err(UnservableReason::InventoryShortfall { remaining: 5 })
        );
        assert_eq!(
            plan(70, &inventory, &MachineConfig::default()),
            Err(UnservableReason::InventoryShortfall { remaining: 5 })
        );
        assert_eq!(
            plan(65, &inventory, &MachineConfig::default()).unwrap(),
            notes(&[(5, 1), (50, 1), (10, 1)])
        );
    }

    #[test]
    fn odd_amount_without_small_note_is_unservable() {
        let inventory = stocked(&[(10, 10), (20, 10), (50, 10)]);
        assert_eq!(
            plan(25, &inventory, &MachineConfig::default()),
            Err(UnservableReason::NoSmallNoteAvailable { smallest: 5 })
        );
    }

    #[test]
    fn non_multiple_is_unservable() {
        assert_eq!(
            plan(23, &full_machine(), &MachineConfig::default()),
            Err(UnservableReason::NotMultipleOfSmallestNote { smallest: 5 })
        );
    }

    #[test]
    fn small_notes_top_up_greedy_leftover() {
        let inventory = stocked(&[(5, 10), (50, 1)]);
        assert_eq!(
            plan(85, &inventory, &MachineConfig::default()).unwrap(),
            notes(&[(50, 1), (5, 7)])
        );
    }

    #[test]
    fn greedy_exhaustion_fails_fast() {
        // 60 = 3 × 20 would work, but greedy takes the 50 first and is stuck.
        let inventory = stocked(&[(20, 3), (50, 1)]);
        assert_eq!(
            plan(60, &inventory, &MachineConfig::default()),
            Err(UnservableReason::InventoryShortfall { remaining: 10 })
        );
    }

    #[test]
    fn empty_machine_cannot_pay() {
        assert_eq!(
            plan(40, &Inventory::new(), &MachineConfig::default()),
            Err(UnservableReason::InventoryShortfall { remaining: 40 })
        );
    }

    #[test]
    fn alternate_note_set_uses_its_own_smallest_note() {
        let config = MachineConfig::new([10, 20, 100], 20, 500, "£").unwrap();
        let inventory = stocked(&[(10, 50), (20, 50), (100, 50)]);
        assert_eq!(
            plan(130, &inventory, &config).unwrap(),
            notes(&[(10, 1), (100, 1), (20, 1)])
        );
        assert_eq!(
            plan(140, &inventory, &config).unwrap(),
            notes(&[(10, 2), (100, 1), (20, 1)])
        );
        assert!(matches!(
            plan(135, &inventory, &config),
            Err(UnservableReason::NotMultipleOfSmallestNote { smallest: 10 })
        ));
    }

    #[test]
    fn largest_allowed_note_does_not_overflow() {
        let config = MachineConfig::new([MAX_DENOMINATION], 1, u32::MAX, "£").unwrap();
        let inventory = stocked(&[(MAX_DENOMINATION, 2)]);
        assert_eq!(
            plan(MAX_DENOMINATION, &inventory, &config).unwrap(),
            notes(&[(MAX_DENOMINATION, 1)])
        );
    }

    #[test]
    fn every_allowed_amount_is_paid_exactly() {
        let config = MachineConfig::default();
        let inventory = full_machine();
        for amount in (20..=250).step_by(5) {
            let plan = plan(amount, &inventory, &config).unwrap();
            assert_eq!(plan.total(), u64::from(amount), "amount {amount}");
            assert!(plan.count_of(5) >= 1, "amount {amount} skipped the small note");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: a plan is either exact and within stock, or rejected.
        #[test]
        fn plan_is_exact_and_within_stock(
            amount in (4u32..=50).prop_map(|k| k * 5),
            fives in 0u32..6,
            tens in 0u32..6,
            twenties in 0u32..6,
            fifties in 0u32..6,
        ) {
            let inventory = stocked(&[(5, fives), (10, tens), (20, twenties), (50, fifties)]);
            match plan(amount, &inventory, &MachineConfig::default()) {
                Ok(plan) => {
                    prop_assert_eq!(plan.total(), u64::from(amount));
                    prop_assert!(inventory.covers(&plan));
                    if amount % 10 == 5 {
                        prop_assert!(plan.count_of(5) >= 1);
                    }
                }
                Err(UnservableReason::NoSmallNoteAvailable { .. }) => {
                    prop_assert!(amount % 10 == 5 && fives == 0);
                }
                Err(UnservableReason::InventoryShortfall { remaining }) => {
                    prop_assert!(remaining > 0 && remaining <= amount);
                }
                Err(other) => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
