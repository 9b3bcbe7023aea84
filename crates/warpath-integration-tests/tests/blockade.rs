//! Blockade windows: exclusion from candidate selection, expiry timing,
//! routing around blocked waypoints, and the no-stacking limitation.

use warpath_core::event::Event;
use warpath_core::test_utils::*;

fn attack(target: &str, demand: u32, value: u64) -> Event {
    Event::Attack {
        target: target.into(),
        demand,
        value,
    }
}

fn block(name: &str, duration: u64) -> Event {
    Event::Block {
        name: name.into(),
        duration,
    }
}

#[test]
fn blocked_sole_candidate_drops_the_attack() {
    let mut engine = frontier_pair();

    engine.schedule(0, block("Duskwatch", 10));
    engine.schedule(3, attack("Ashfall", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 0);
}

#[test]
fn attack_after_the_window_succeeds() {
    let mut engine = frontier_pair();

    engine.schedule(0, block("Duskwatch", 10));
    engine.schedule(11, attack("Ashfall", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 9);
}

#[test]
fn eligibility_returns_exactly_at_expiry() {
    let mut engine = frontier_pair();

    engine.schedule(0, block("Duskwatch", 10));
    // Tick 10 is time + duration: the window is over, inclusive.
    engine.schedule(10, attack("Ashfall", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 9);
}

#[test]
fn explicit_unblock_reopens_early() {
    let mut engine = frontier_pair();

    engine.schedule(0, block("Duskwatch", 100));
    engine.schedule(5, Event::Unblock {
        name: "Duskwatch".into(),
    });
    engine.schedule(6, attack("Ashfall", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 9);
}

#[test]
fn repeat_blocks_do_not_stack() {
    let mut engine = frontier_pair();

    // The second block would run to tick 11, but the first block's unblock
    // fires at tick 2 and clears the flag for both.
    engine.schedule(0, block("Duskwatch", 2));
    engine.schedule(1, block("Duskwatch", 10));
    engine.schedule(5, attack("Ashfall", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 9);
}

#[test]
fn blocked_waypoint_is_routed_around() {
    // The only short route from the village to the mine runs through a
    // waypoint; a long detour exists.
    let mut engine = territory(
        &["village", "waypoint", "detour1", "detour2"],
        &[("mine", 50, 1, 5)],
        &[
            ("village", "waypoint", 1),
            ("waypoint", "mine", 1),
            ("village", "detour1", 10),
            ("detour1", "detour2", 10),
            ("detour2", "mine", 10),
        ],
    );

    engine.schedule(0, block("waypoint", 100));
    engine.schedule(1, attack("village", 5, 9));
    engine.drain(&mut ());

    // The attack still lands, via the 30-tick detour: start at 31,
    // complete at 36, refill at 41. The block's own unblock at tick 100 is
    // the last event in the run.
    assert_eq!(engine.gold_total(), 9);
    assert_eq!(engine.current_tick(), 100);
}

#[test]
fn blocked_waypoint_with_no_detour_cuts_the_mine_off() {
    let mut engine = territory(
        &["village", "waypoint"],
        &[("mine", 50, 1, 5)],
        &[("village", "waypoint", 1), ("waypoint", "mine", 1)],
    );

    engine.schedule(0, block("waypoint", 100));
    engine.schedule(1, attack("village", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 0);
}

#[test]
fn blocking_a_plain_clan_does_not_disturb_mines() {
    let mut engine = frontier_pair();

    // Ashfall is blocked, but it is the attack's own target; the road to
    // Duskwatch starts there and the mine itself is open.
    engine.schedule(0, block("Ashfall", 100));
    engine.schedule(1, attack("Ashfall", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 9);
}
