//! Property-based tests for tab registry operations.
//!
//! Arbitrary sequences of create/close/switch must never leave the registry
//! without a tab or with an active pointer to a tab that does not exist.

use portal_browser::managers::tab_manager::{TabManager, TabManagerTrait};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create,
    Close(usize),
    Switch(usize),
    CloseUnknown,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Create),
        3 => (0usize..8).prop_map(Op::Close),
        2 => (0usize..8).prop_map(Op::Switch),
        1 => Just(Op::CloseUnknown),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn registry_never_empties(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut mgr = TabManager::new();
        mgr.create_tab();

        for op in ops {
            match op {
                Op::Create => {
                    mgr.create_tab();
                }
                Op::Close(i) => {
                    let id = mgr.get_all_tabs()[i % mgr.tab_count()].id;
                    let _ = mgr.close_tab(id);
                }
                Op::Switch(i) => {
                    let id = mgr.get_all_tabs()[i % mgr.tab_count()].id;
                    prop_assert!(mgr.switch_to(id));
                }
                Op::CloseUnknown => {
                    prop_assert!(mgr.close_tab(u64::MAX).is_err());
                }
            }

            prop_assert!(mgr.tab_count() >= 1);
            let active = mgr.active_tab_id();
            prop_assert!(active.is_some());
            prop_assert!(mgr.get_active_tab().is_some());
        }
    }

    #[test]
    fn closing_active_picks_neighbour(n in 2usize..8, pick in 0usize..8) {
        let mut mgr = TabManager::new();
        for _ in 0..n {
            mgr.create_tab();
        }
        let ids: Vec<_> = mgr.get_all_tabs().iter().map(|t| t.id).collect();
        let idx = pick % n;
        mgr.switch_to(ids[idx]);
        mgr.close_tab(ids[idx]).unwrap();

        let expected = if idx == 0 { ids[1] } else { ids[idx - 1] };
        prop_assert_eq!(mgr.active_tab_id(), Some(expected));
    }
}
