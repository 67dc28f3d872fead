use std::time::{Duration, Instant};

use proptest::prelude::*;

use institute_core::rotation::{
    Direction, Phase, RotationConfig, RotationController, RotationEvent, StartPosition,
};

const TRANSITION_MS: u64 = 300;

#[derive(Debug, Clone)]
enum Action {
    Advance { forward: bool },
    Jump { index: u8 },
    Hover { start: bool },
    Swipe { from: u16, to: u16 },
    Wait { ms: u16 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        any::<bool>().prop_map(|forward| Action::Advance { forward }),
        (0u8..20).prop_map(|index| Action::Jump { index }),
        any::<bool>().prop_map(|start| Action::Hover { start }),
        (0u16..800, 0u16..800).prop_map(|(from, to)| Action::Swipe { from, to }),
        (0u16..6000).prop_map(|ms| Action::Wait { ms }),
    ]
}

fn config(loop_mode: bool, autoplay: bool, start: StartPosition) -> RotationConfig {
    RotationConfig {
        autoplay,
        auto_advance_interval: Duration::from_millis(5000),
        transition_duration: Duration::from_millis(TRANSITION_MS),
        settle_delay: Duration::from_millis(500),
        swipe_threshold: 50.0,
        loop_mode,
        start,
    }
}

fn direction(forward: bool) -> Direction {
    if forward {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

fn moves(events: &[RotationEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, RotationEvent::Moved { .. }))
        .count()
}

fn assert_in_range(c: &RotationController) {
    if c.display_len() == 0 {
        assert_eq!(c.phase(), Phase::Empty);
    } else {
        assert!(c.current_index() < c.display_len());
    }
}

proptest! {
    #[test]
    fn initialize_keeps_index_in_range(
        item_count in 0usize..64,
        loop_mode in any::<bool>(),
        middle in any::<bool>(),
    ) {
        let start = if middle { StartPosition::Middle } else { StartPosition::First };
        let c = RotationController::new(config(loop_mode, true, start), item_count, Instant::now())
            .unwrap();

        assert_in_range(&c);
        let expected_len = match item_count {
            0 => 0,
            n if loop_mode => n + 2,
            n => n,
        };
        prop_assert_eq!(c.display_len(), expected_len);
        if item_count > 0 {
            prop_assert!(!c.is_padding(c.current_index()));
        }
    }

    #[test]
    fn random_sequences_keep_index_in_range(
        item_count in 0usize..8,
        loop_mode in any::<bool>(),
        actions in prop::collection::vec(action_strategy(), 1..120),
    ) {
        let mut t = Instant::now();
        let mut c = RotationController::new(config(loop_mode, true, StartPosition::First), item_count, t)
            .unwrap();
        let mut hovering = false;

        for action in actions {
            match action {
                Action::Advance { forward } => { c.advance(direction(forward), t); }
                Action::Jump { index } => { c.jump_to(index as usize, t); }
                Action::Hover { start } => {
                    if start { c.interaction_start(t) } else { c.interaction_end(t) }
                    hovering = start;
                }
                Action::Swipe { from, to } => {
                    c.pointer_down(f32::from(from), t);
                    c.pointer_move(f32::from(to));
                    c.pointer_up(t + Duration::from_millis(50));
                    hovering = false;
                }
                Action::Wait { ms } => {
                    t += Duration::from_millis(u64::from(ms));
                    c.poll(t);
                }
            }
            assert_in_range(&c);
        }

        // Once nobody holds the carousel and every timer has had its chance,
        // no padding clone is left on screen.
        if hovering {
            c.interaction_end(t);
        }
        t += Duration::from_secs(1);
        c.poll(t);
        prop_assert!(!c.is_padding(c.current_index()));
    }

    #[test]
    fn at_most_one_transition_in_flight(
        item_count in 2usize..10,
        loop_mode in any::<bool>(),
        calls in prop::collection::vec((any::<bool>(), 0u64..600), 1..80),
    ) {
        let mut t = Instant::now();
        let mut c = RotationController::new(config(loop_mode, false, StartPosition::First), item_count, t)
            .unwrap();
        let mut eligible = 0;
        let mut effective = 0;

        for (forward, gap) in calls {
            t += Duration::from_millis(gap);
            c.poll(t);
            if !c.transition_in_flight() {
                eligible += 1;
            }
            effective += moves(&c.advance(direction(forward), t));
        }

        prop_assert_eq!(effective, eligible);
    }

    #[test]
    fn full_loop_returns_to_starting_item(
        item_count in 2usize..16,
        start_seed in any::<usize>(),
    ) {
        let start = start_seed % item_count;
        let step = Duration::from_millis(TRANSITION_MS);
        let mut t = Instant::now();
        let mut c = RotationController::new(config(true, false, StartPosition::First), item_count, t)
            .unwrap();

        c.jump_to(start, t);
        t += step;
        c.poll(t);
        prop_assert_eq!(c.real_index(), Some(start));

        for _ in 0..item_count {
            c.advance(Direction::Forward, t);
            t += step;
            c.poll(t);
        }

        prop_assert_eq!(c.real_index(), Some(start));
        prop_assert!(!c.is_padding(c.current_index()));
    }
}
