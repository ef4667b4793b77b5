//! Property tests: stack and registry stay consistent under arbitrary
//! navigation, gesture and frame sequences

use passage_core::{GestureEvent, Route, Router};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Tab {
    A,
    B,
    C,
}

#[derive(Clone, Debug)]
enum Op {
    Go(Tab),
    Pop,
    Gesture(GestureEvent),
    Frames(u8),
}

fn tab() -> impl Strategy<Value = Tab> {
    prop_oneof![Just(Tab::A), Just(Tab::B), Just(Tab::C)]
}

fn gesture() -> impl Strategy<Value = GestureEvent> {
    prop_oneof![
        Just(GestureEvent::Started),
        (0.0f32..=1.0).prop_map(GestureEvent::Progressed),
        Just(GestureEvent::Committed),
        Just(GestureEvent::Cancelled),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => tab().prop_map(Op::Go),
        2 => Just(Op::Pop),
        2 => gesture().prop_map(Op::Gesture),
        2 => (1u8..30).prop_map(Op::Frames),
    ]
}

fn apply(router: &mut Router<Tab>, op: &Op) {
    match op {
        Op::Go(tab) => {
            router.go(tab.clone());
        }
        Op::Pop => {
            router.pop();
        }
        Op::Gesture(event) => {
            router.handle_gesture(*event);
        }
        Op::Frames(count) => {
            for _ in 0..*count {
                router.frame(1.0 / 60.0);
            }
        }
    }
}

fn assert_consistent(router: &Router<Tab>) {
    let stack = router.stack();
    assert!(stack.len() >= 1);
    assert_eq!(stack.as_slice()[0], Route::Sentinel);
    assert_eq!(router.is_empty(), stack.len() == 1);
    assert_eq!(router.is_not_empty(), stack.len() > 1);
    assert_eq!(
        stack.iter().filter(|route| route.is_sentinel()).count(),
        1
    );

    for route in stack.iter() {
        let instance = router.instance(route).expect("stacked route has an instance");
        assert!(instance.in_stack());
    }
    let current = router
        .instance(router.current())
        .expect("current route has an instance");
    assert!(current.is_opened());
    assert!(router.is_rendered(router.current()));
    assert_eq!(router.instances().filter(|i| i.is_opened()).count(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stack_and_registry_stay_consistent(ops in prop::collection::vec(op(), 0..40)) {
        let mut router = Router::new();
        for op in &ops {
            apply(&mut router, op);
            assert_consistent(&router);
        }
    }

    #[test]
    fn exited_instances_are_eventually_disposed(ops in prop::collection::vec(op(), 0..40)) {
        let mut router = Router::new();
        for op in &ops {
            apply(&mut router, op);
        }
        // Release any drag so every scalar can settle
        router.handle_gesture(GestureEvent::Cancelled);

        let mut settled = false;
        for _ in 0..2000 {
            if !router.frame(1.0 / 60.0).active {
                settled = true;
                break;
            }
        }
        prop_assert!(settled);

        let stacked: HashSet<_> = router.stack().iter().cloned().collect();
        let live: HashSet<_> = router.instances().map(|i| i.route().clone()).collect();
        prop_assert_eq!(live, stacked);
    }

    #[test]
    fn go_current_and_pop_empty_are_noops(ops in prop::collection::vec(op(), 0..20)) {
        let mut router = Router::new();
        for op in &ops {
            apply(&mut router, op);
        }

        let before = router.stack().clone();
        if let Some(screen) = router.current().screen().cloned() {
            prop_assert!(!router.go(screen));
            prop_assert_eq!(router.stack(), &before);
        } else {
            prop_assert_eq!(router.pop(), None);
            prop_assert_eq!(router.stack(), &before);
        }
    }
}
