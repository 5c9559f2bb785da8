//! Property-based tests for the controller state machine.
//!
//! Random sequences of external events and input frames must never break
//! the hook-ordering and gating guarantees.

use glam::Vec3;
use pickplant::engine::input::{shared_input, Button};
use pickplant::fsm::{self, Machine, StateHooks, StateMachine, StateTable};
use pickplant::{ActorConfig, KillCause, Player, PlayerState};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Picked,
    Thrown,
    Hit,
    Direction(bool),
    PressThrow,
    PressPick,
    ReleasePick,
    Frame { physics_steps: u32 },
}

prop_compose! {
    fn arbitrary_step()(variant in 0..8u8, flag in any::<bool>(), steps in 0..3u32) -> Step {
        match variant {
            0 => Step::Picked,
            1 => Step::Thrown,
            2 => Step::Hit,
            3 => Step::Direction(flag),
            4 => Step::PressThrow,
            5 => Step::PressPick,
            6 => Step::ReleasePick,
            _ => Step::Frame { physics_steps: steps },
        }
    }
}

prop_compose! {
    fn arbitrary_cause()(code in 0..4u8) -> KillCause {
        KillCause::try_from(code).unwrap()
    }
}

fn apply(p: &mut Player, input: &pickplant::engine::input::SharedInput, step: &Step) {
    match step {
        Step::Picked => p.on_picked(),
        Step::Thrown => p.on_thrown(),
        Step::Hit => p.on_hit(),
        Step::Direction(moving) => input
            .borrow_mut()
            .set_direction(if *moving { Vec3::X } else { Vec3::ZERO }),
        Step::PressThrow => input.borrow_mut().press(Button::Throw),
        Step::PressPick => input.borrow_mut().press(Button::PickMe),
        Step::ReleasePick => input.borrow_mut().release(Button::PickMe),
        Step::Frame { physics_steps } => {
            p.frame(1.0 / 60.0, *physics_steps);
            input.borrow_mut().end_frame();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Gear {
    Park,
    Drive,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hooked {
    Enter(Gear),
    Exit(Gear),
}

/// Records every enter and exit hook the dispatcher runs.
struct Gearbox {
    fsm: StateMachine<Gearbox>,
    log: Vec<Hooked>,
}

impl Machine for Gearbox {
    type State = Gear;

    fn fsm(&self) -> &StateMachine<Self> {
        &self.fsm
    }

    fn fsm_mut(&mut self) -> &mut StateMachine<Self> {
        &mut self.fsm
    }
}

fn gearbox() -> Gearbox {
    let table = StateTable::new()
        .with(
            Gear::Park,
            StateHooks::new()
                .on_enter(|g: &mut Gearbox| g.log.push(Hooked::Enter(Gear::Park)))
                .on_exit(|g: &mut Gearbox| g.log.push(Hooked::Exit(Gear::Park))),
        )
        .with(
            Gear::Drive,
            StateHooks::new()
                .on_enter(|g: &mut Gearbox| g.log.push(Hooked::Enter(Gear::Drive)))
                .on_exit(|g: &mut Gearbox| g.log.push(Hooked::Exit(Gear::Drive))),
        )
        .with(
            Gear::Reverse,
            StateHooks::new()
                .on_enter(|g: &mut Gearbox| g.log.push(Hooked::Enter(Gear::Reverse)))
                .on_exit(|g: &mut Gearbox| g.log.push(Hooked::Exit(Gear::Reverse))),
        );
    Gearbox {
        fsm: StateMachine::new(Gear::Park, table),
        log: Vec::new(),
    }
}

fn arbitrary_gear() -> impl Strategy<Value = Gear> {
    prop_oneof![Just(Gear::Park), Just(Gear::Drive), Just(Gear::Reverse)]
}

proptest! {
    #[test]
    fn assignments_run_exit_then_enter_once(targets in prop::collection::vec(arbitrary_gear(), 0..40)) {
        let mut g = gearbox();
        fsm::start(&mut g);
        prop_assert_eq!(g.log.clone(), vec![Hooked::Enter(Gear::Park)]);

        for next in targets {
            let current = g.fsm.state();
            let before = g.log.len();
            let changed = fsm::set_state(&mut g, next);
            if current == next {
                prop_assert!(!changed);
                prop_assert_eq!(g.log.len(), before);
            } else {
                prop_assert!(changed);
                prop_assert_eq!(&g.log[before..], &[Hooked::Exit(current), Hooked::Enter(next)][..]);
                prop_assert_eq!(g.fsm.previous(), current);
            }
            prop_assert_eq!(g.fsm.state(), next);
        }
    }

    #[test]
    fn trail_is_on_exactly_while_running(steps in prop::collection::vec(arbitrary_step(), 0..60)) {
        let mut p = Player::new("p", 0, ActorConfig::default());
        let input = shared_input();
        p.bind_input(input.clone());
        for step in &steps {
            apply(&mut p, &input, step);
            prop_assert_eq!(p.movement.trail_enabled(), p.state() == PlayerState::Running);
        }
    }

    #[test]
    fn captured_always_blocks_picking(steps in prop::collection::vec(arbitrary_step(), 0..60)) {
        let mut p = Player::new("p", 0, ActorConfig::default());
        let input = shared_input();
        p.bind_input(input.clone());
        for step in &steps {
            apply(&mut p, &input, step);
            if p.state() == PlayerState::Captured {
                prop_assert!(p.pickable.is_pick_blocked());
                prop_assert!(p.holder.is_unavailable());
            }
        }
    }

    #[test]
    fn indicator_matches_last_late_update(steps in prop::collection::vec(arbitrary_step(), 1..60)) {
        let mut p = Player::new("p", 0, ActorConfig::default());
        let input = shared_input();
        p.bind_input(input.clone());
        for step in &steps {
            apply(&mut p, &input, step);
            if matches!(step, Step::Frame { .. }) {
                prop_assert_eq!(p.pick_me_fx.is_active(), !p.pickable.is_pick_blocked());
            }
        }
    }

    #[test]
    fn unbound_actor_never_leaves_idle_on_its_own(frames in 0..30usize, physics in 0..3u32) {
        let mut p = Player::new("p", 0, ActorConfig::default());
        for _ in 0..frames {
            p.frame(1.0 / 60.0, physics);
        }
        prop_assert_eq!(p.state(), PlayerState::Idle);
    }

    #[test]
    fn one_kill_per_respawn_cycle(causes in prop::collection::vec(arbitrary_cause(), 1..10)) {
        let mut p = Player::new("p", 0, ActorConfig::default());
        let state_before = p.state();
        let processed = causes.iter().filter(|c| p.kill_by(**c)).count();
        prop_assert_eq!(processed, 1);
        prop_assert_eq!(p.respawner.registrations(), 1);
        prop_assert_eq!(p.holder.deaths(), 1);
        prop_assert_eq!(p.last_kill_cause(), Some(causes[0]));
        prop_assert_eq!(p.state(), state_before);
    }
}
