//! Property-based tests for per-tab navigation history.

use portal_browser::managers::navigation_controller::NavigationController;
use portal_browser::services::frame_host::EventFrameHost;
use portal_browser::types::frame::NavOutcome;
use portal_browser::types::settings::PortalSettings;
use proptest::prelude::*;

fn controller() -> NavigationController<EventFrameHost> {
    let mut settings = PortalSettings::default();
    settings.geo_shard.enabled = false;
    NavigationController::new(EventFrameHost::new(), &settings)
}

fn visit(nav: &mut NavigationController<EventFrameHost>, host: &str) {
    let pending = nav.prepare(host).unwrap().unwrap();
    let destination = format!("https://{}", pending.input);
    nav.commit(pending, &destination).unwrap();
}

#[derive(Debug, Clone)]
enum Step {
    Visit(String),
    Back,
    Forward,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-z]{1,8}\\.example".prop_map(Step::Visit),
        Just(Step::Back),
        Just(Step::Forward),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn n_visits_fill_history(hosts in prop::collection::vec("[a-z]{1,8}\\.example", 1..20)) {
        let mut nav = controller();
        for host in &hosts {
            visit(&mut nav, host);
        }
        let tab = nav.active_tab().unwrap();
        prop_assert_eq!(tab.history.len(), hosts.len());
        prop_assert_eq!(tab.history_index, Some(hosts.len() - 1));
        let last = format!("https://{}", hosts[hosts.len() - 1]);
        prop_assert_eq!(&tab.current_url, &last);
    }

    #[test]
    fn history_pointer_stays_in_bounds(steps in prop::collection::vec(arb_step(), 1..40)) {
        let mut nav = controller();
        let mut visits = 0usize;

        for step in steps {
            match step {
                Step::Visit(host) => {
                    visit(&mut nav, &host);
                    visits += 1;
                    let tab = nav.active_tab().unwrap();
                    prop_assert_eq!(tab.history_index, Some(tab.history.len() - 1));
                }
                Step::Back => {
                    let before = nav.active_tab().unwrap().history_index;
                    let outcome = nav.back().unwrap();
                    if matches!(before, None | Some(0)) {
                        prop_assert_eq!(outcome, NavOutcome::Ignored);
                    }
                }
                Step::Forward => {
                    let tab = nav.active_tab().unwrap();
                    let at_end = tab.history_index.map_or(true, |i| i + 1 == tab.history.len());
                    let outcome = nav.forward().unwrap();
                    if at_end {
                        prop_assert_eq!(outcome, NavOutcome::Ignored);
                    }
                }
            }

            let tab = nav.active_tab().unwrap();
            prop_assert_eq!(tab.history.len(), visits);
            if let Some(i) = tab.history_index {
                prop_assert!(i < tab.history.len());
                prop_assert_eq!(&tab.current_url, &tab.history[i]);
            } else {
                prop_assert!(tab.history.is_empty());
            }
        }
    }
}
