use chrono::Duration as ChronoDuration;
use rcountdown::core::clock::ManualClock;
use rcountdown::core::countdown::{CountdownEngine, EngineSettings, InitOutcome};
use rcountdown::core::scheduler::{Scheduler, Task};
use rcountdown::models::duration::{
    DURATION_KEY, DurationRecord, LoadOutcome, load_record, remaining_seconds, save_record,
};
use rcountdown::models::tier::{Status, Tier};
use rcountdown::store::KeyValueStore;
use rcountdown::store::memory::MemoryStore;
use rcountdown::utils::format_hms;
use std::time::Instant;

mod common;
use common::{RecordingView, t0};

fn engine_with(
    record: Option<DurationRecord>,
    clock: &ManualClock,
) -> (CountdownEngine<MemoryStore, ManualClock>, MemoryStore) {
    let mut store = MemoryStore::new();
    if let Some(r) = record {
        save_record(&mut store, &r).unwrap();
    }
    let engine = CountdownEngine::new(store.clone(), clock.clone(), EngineSettings::default());
    (engine, store)
}

#[test]
fn test_remaining_is_clamped_and_non_increasing() {
    for total in [0u64, 1, 59, 3600, 10_800, 90_000] {
        let mut previous = u64::MAX;
        for elapsed in [0u64, 1, 2, 59, 60, 3599, 3600, 10_800, 200_000] {
            let r = remaining_seconds(total, elapsed);
            assert_eq!(r, total.saturating_sub(elapsed));
            assert!(r <= previous, "remaining grew for total={total} e={elapsed}");
            previous = r;
        }
    }
}

#[test]
fn test_remaining_uses_whole_elapsed_seconds() {
    let record = DurationRecord::new(0, 10, 0, t0());
    assert_eq!(record.remaining_at(t0()), 600);
    assert_eq!(
        record.remaining_at(t0() + ChronoDuration::milliseconds(1999)),
        599
    );
    // a start time in the future never adds time
    assert_eq!(record.remaining_at(t0() - ChronoDuration::seconds(30)), 600);
}

#[test]
fn test_format_hms_pads_and_grows_hours() {
    assert_eq!(format_hms(0), "00:00:00");
    assert_eq!(format_hms(9015), "02:30:15");
    assert_eq!(format_hms(360_000), "100:00:00");
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(Tier::for_remaining(0), Tier::Urgent);
    assert_eq!(Tier::for_remaining(3599), Tier::Urgent);
    assert_eq!(Tier::for_remaining(3600), Tier::Warning);
    assert_eq!(Tier::for_remaining(10_799), Tier::Warning);
    assert_eq!(Tier::for_remaining(10_800), Tier::Normal);
}

#[test]
fn test_initialize_with_stored_record() {
    let clock = ManualClock::new(t0());
    let (mut engine, _store) = engine_with(Some(DurationRecord::new(2, 30, 15, t0())), &clock);
    clock.advance_secs(10);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    let outcome = engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    assert_eq!(outcome, InitOutcome::Stored);
    assert_eq!(engine.remaining_seconds(), 9015 - 10);
    assert_eq!(view.last_status(), Some("In Progress"));
    assert_eq!(view.last_due(), Some("Not Set"));
    // nothing is drawn before the first tick
    assert!(view.timers.is_empty());
}

#[test]
fn test_initialize_without_record_persists_default() {
    let clock = ManualClock::new(t0());
    let (mut engine, store) = engine_with(None, &clock);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    let outcome = engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    assert_eq!(outcome, InitOutcome::Defaulted);
    assert_eq!(engine.remaining_seconds(), 3600);

    let stored = load_record(&store).unwrap();
    let LoadOutcome::Present(record) = stored else {
        panic!("default record was not written");
    };
    assert_eq!(record.total_seconds, 3600);
    assert_eq!((record.hours, record.minutes, record.seconds), (1, 0, 0));
    assert_eq!(record.start_time, "2026-10-19T08:00:00.000Z");
}

#[test]
fn test_malformed_record_falls_back_to_default() {
    let clock = ManualClock::new(t0());
    let (mut engine, mut store) = engine_with(None, &clock);
    store.set_item(DURATION_KEY, "{not json").unwrap();

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    let outcome = engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    let InitOutcome::Recovered(reason) = outcome else {
        panic!("expected a recovered outcome, got {outcome:?}");
    };
    assert!(reason.contains("countdownDuration"));
    assert_eq!(engine.remaining_seconds(), 3600);
    assert!(load_record(&store).unwrap().record().is_some());
}

#[test]
fn test_negative_components_are_kept_as_stored() {
    let clock = ManualClock::new(t0());
    let (mut engine, mut store) = engine_with(None, &clock);
    let payload = r#"{"hours":2,"minutes":-5,"seconds":0,"totalSeconds":6900,"startTime":"2026-10-19T08:00:00.000Z"}"#;
    store.set_item(DURATION_KEY, payload).unwrap();

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    let outcome = engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    assert_eq!(outcome, InitOutcome::Stored);
    assert_eq!(engine.remaining_seconds(), 6900);
    assert_eq!(engine.record().map(|r| r.minutes), Some(-5));
    assert_eq!(store.get_item(DURATION_KEY).unwrap().as_deref(), Some(payload));
}

#[test]
fn test_unreadable_start_time_is_recovered() {
    let clock = ManualClock::new(t0());
    let (mut engine, store) = engine_with(None, &clock);
    let mut writer = store.clone();
    writer
        .set_item(
            DURATION_KEY,
            r#"{"hours":0,"minutes":10,"seconds":0,"totalSeconds":600,"startTime":"yesterday"}"#,
        )
        .unwrap();

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    let outcome = engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    let InitOutcome::Recovered(reason) = outcome else {
        panic!("expected a recovered outcome, got {outcome:?}");
    };
    assert!(reason.contains("startTime"));
    assert_eq!(engine.remaining_seconds(), 3600);

    let LoadOutcome::Present(record) = load_record(&store).unwrap() else {
        panic!("default record was not written");
    };
    assert_eq!(record.start_time, "2026-10-19T08:00:00.000Z");
}

#[test]
fn test_tick_renders_then_decrements() {
    let clock = ManualClock::new(t0());
    let (mut engine, _store) = engine_with(Some(DurationRecord::new(1, 0, 0, t0())), &clock);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    engine.tick(&mut sched, &mut view);
    assert_eq!(view.last_timer(), Some(("01:00:00", Tier::Warning)));
    assert_eq!(engine.remaining_seconds(), 3599);

    engine.tick(&mut sched, &mut view);
    assert_eq!(view.last_timer(), Some(("00:59:59", Tier::Urgent)));
    assert_eq!(engine.remaining_seconds(), 3598);
}

#[test]
fn test_reinitialize_unchanged_record_is_idempotent() {
    let clock = ManualClock::new(t0());
    let (mut engine, _store) = engine_with(Some(DurationRecord::new(0, 45, 0, t0())), &clock);
    clock.advance_secs(100);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();
    let first = engine.remaining_seconds();

    clock.advance(ChronoDuration::milliseconds(400));
    engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();
    let second = engine.remaining_seconds();

    assert!(first.abs_diff(second) <= 1);
}

#[test]
fn test_reinitialize_keeps_a_single_tick_timer() {
    let clock = ManualClock::new(t0());
    let (mut engine, _store) = engine_with(None, &clock);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    for _ in 0..5 {
        engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();
        assert_eq!(sched.active_count(Task::Tick), 1);
    }

    let timer = engine.timer().expect("tick timer running");
    assert!(sched.is_active(timer));
}

#[test]
fn test_expired_countdown_shows_time_up_and_stops() {
    let clock = ManualClock::new(t0());
    let (mut engine, _store) = engine_with(Some(DurationRecord::new(0, 1, 0, t0())), &clock);
    clock.advance_secs(120);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();
    assert_eq!(engine.remaining_seconds(), 0);

    engine.tick(&mut sched, &mut view);
    assert_eq!(view.last_timer(), Some(("00:00:00", Tier::Urgent)));
    assert_eq!(view.last_status(), Some("Time Up"));
    assert_eq!(engine.status(), Status::TimeUp);
    assert!(engine.timer().is_none());
    assert_eq!(sched.active_count(Task::Tick), 0);

    // no further renders or decrements
    engine.tick(&mut sched, &mut view);
    engine.tick(&mut sched, &mut view);
    assert_eq!(view.timers.len(), 1);
    assert_eq!(engine.remaining_seconds(), 0);
}

#[test]
fn test_countdown_reaches_time_up_after_last_second() {
    let clock = ManualClock::new(t0());
    let (mut engine, _store) = engine_with(Some(DurationRecord::new(0, 0, 2, t0())), &clock);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    for _ in 0..4 {
        engine.tick(&mut sched, &mut view);
    }

    let texts: Vec<&str> = view.timers.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, vec!["00:00:02", "00:00:01", "00:00:00"]);
    assert_eq!(view.last_status(), Some("Time Up"));
}

#[test]
fn test_submitted_status_survives_reinitialize() {
    let clock = ManualClock::new(t0());
    let (mut engine, _store) = engine_with(None, &clock);

    let mut sched = Scheduler::new();
    let mut view = RecordingView::default();
    engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();
    engine.mark_submitted(&mut view);
    engine.initialize(&mut sched, Instant::now(), &mut view).unwrap();

    assert_eq!(engine.status(), Status::Submitted);
    assert_eq!(view.last_status(), Some("Submitted"));
}
