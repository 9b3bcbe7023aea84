//! Candidate selection: round-trip ranking, all-or-nothing demand, busy
//! mines, and the first-fit fall-through.

use warpath_core::event::Event;
use warpath_core::query::CollectSink;
use warpath_core::test_utils::*;

fn attack(target: &str, demand: u32, value: u64) -> Event {
    Event::Attack {
        target: target.into(),
        demand,
        value,
    }
}

/// Availability of a named mine in the engine's current status report.
fn available(engine: &warpath_core::engine::Engine, name: &str) -> u32 {
    engine
        .status_report()
        .mines
        .iter()
        .find(|m| m.name == name)
        .map(|m| m.available)
        .unwrap_or_else(|| panic!("no mine named {name}"))
}

#[test]
fn nearest_mine_serves_the_attack() {
    let mut engine = territory(
        &["target"],
        &[("near", 10, 1, 100), ("far", 10, 1, 100)],
        &[("target", "near", 2), ("target", "far", 9)],
    );
    let mut sink = CollectSink::new();

    engine.schedule(0, attack("target", 5, 1));
    // Probe between the near mine's completion (tick 7) and its distant
    // refill, so the depletion shows which mine ran the cycle.
    engine.schedule(20, Event::StatusQuery);
    engine.drain(&mut sink);

    let report = &sink.status_reports()[0];
    let by_name: Vec<(&str, u32)> = report
        .mines
        .iter()
        .map(|m| (m.name.as_str(), m.available))
        .collect();
    assert_eq!(by_name, vec![("far", 10), ("near", 5)]);
}

#[test]
fn equidistant_tie_goes_to_the_earlier_registered_mine() {
    let mut engine = territory(
        &["target"],
        &[("first", 10, 1, 100), ("second", 10, 1, 100)],
        &[("target", "first", 3), ("target", "second", 3)],
    );

    engine.schedule(0, attack("target", 5, 1));
    engine.schedule(20, Event::StatusQuery);
    let mut sink = CollectSink::new();
    engine.drain(&mut sink);

    let report = &sink.status_reports()[0];
    let first = report.mines.iter().find(|m| m.name == "first").unwrap();
    let second = report.mines.iter().find(|m| m.name == "second").unwrap();
    assert_eq!(first.available, 5);
    assert_eq!(second.available, 10);
}

#[test]
fn demand_is_never_split_across_mines() {
    // Two mines of 10 could jointly cover 14, but allocation is
    // all-or-nothing against a single mine.
    let mut engine = territory(
        &["target"],
        &[("left", 10, 1, 100), ("right", 10, 1, 100)],
        &[("target", "left", 1), ("target", "right", 1)],
    );

    engine.schedule(0, attack("target", 14, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 0);
    assert_eq!(available(&engine, "left"), 10);
    assert_eq!(available(&engine, "right"), 10);
}

#[test]
fn nearer_but_smaller_mine_falls_through_to_a_full_fit() {
    let mut engine = territory(
        &["target"],
        &[
            ("closest", 4, 1, 100),
            ("middle", 8, 1, 100),
            ("farthest", 40, 1, 100),
        ],
        &[
            ("target", "closest", 1),
            ("target", "middle", 3),
            ("target", "farthest", 7),
        ],
    );

    engine.schedule(0, attack("target", 20, 6));
    engine.schedule(40, Event::StatusQuery);
    let mut sink = CollectSink::new();
    engine.drain(&mut sink);

    assert_eq!(engine.gold_total(), 6);
    let report = &sink.status_reports()[0];
    let farthest = report.mines.iter().find(|m| m.name == "farthest").unwrap();
    assert_eq!(farthest.available, 20);
}

#[test]
fn busy_mine_hands_the_next_attack_to_the_backup() {
    let mut engine = territory(
        &["target"],
        &[("near", 10, 1, 100), ("far", 10, 1, 100)],
        &[("target", "near", 1), ("target", "far", 5)],
    );

    engine.schedule(0, attack("target", 10, 3));
    // Lands at tick 2 while the near mine's cycle (ticks 1-11) runs.
    engine.schedule(2, attack("target", 10, 4));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 7);
}

#[test]
fn same_tick_attacks_race_for_one_mine_and_the_first_wins() {
    let mut engine = frontier_pair();

    // Both attacks pass candidate selection at tick 0 -- the cycle only
    // starts when the demand arrives at tick 5. The first start claims the
    // mine; the second start finds it busy and dies without a completion.
    engine.schedule(0, attack("Ashfall", 30, 3));
    engine.schedule(0, attack("Ashfall", 30, 100));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 3);
}

#[test]
fn unreachable_mine_is_not_a_candidate() {
    let mut engine = territory(
        &["target"],
        &[("island", 50, 1, 5)],
        &[], // no roads at all
    );

    engine.schedule(0, attack("target", 5, 9));
    engine.drain(&mut ());

    assert_eq!(engine.gold_total(), 0);
}

#[test]
fn mine_can_serve_an_attack_on_itself() {
    let mut engine = territory(&[], &[("keep", 10, 1, 2)], &[]);

    engine.schedule(0, attack("keep", 10, 5));
    engine.drain(&mut ());

    // Zero travel: start 0, complete 10, refill 12.
    assert_eq!(engine.gold_total(), 5);
    assert_eq!(engine.current_tick(), 12);
}
