use rcountdown::core::scheduler::{Scheduler, Task};
use std::time::{Duration, Instant};

#[test]
fn test_interval_first_fires_one_period_later() {
    let mut sched = Scheduler::new();
    let start = Instant::now();
    let id = sched.set_interval(Task::Tick, Duration::from_secs(1), start);

    assert!(sched.take_due(start).is_empty());
    assert_eq!(sched.next_deadline(), Some(start + Duration::from_secs(1)));
    assert_eq!(
        sched.take_due(start + Duration::from_secs(1)),
        vec![(id, Task::Tick)]
    );
    assert_eq!(sched.next_deadline(), Some(start + Duration::from_secs(2)));
}

#[test]
fn test_late_timer_fires_once() {
    let mut sched = Scheduler::new();
    let start = Instant::now();
    sched.set_interval(Task::Poll, Duration::from_secs(1), start);

    let due = sched.take_due(start + Duration::from_millis(5500));
    assert_eq!(due.len(), 1);
    assert_eq!(sched.next_deadline(), Some(start + Duration::from_secs(6)));
}

#[test]
fn test_due_tasks_come_out_in_deadline_order() {
    let mut sched = Scheduler::new();
    let start = Instant::now();
    let poll = sched.set_interval(Task::Poll, Duration::from_millis(500), start);
    let tick = sched.set_interval(Task::Tick, Duration::from_millis(300), start);

    let due = sched.take_due(start + Duration::from_millis(600));
    assert_eq!(due, vec![(tick, Task::Tick), (poll, Task::Poll)]);
}

#[test]
fn test_clear_interval_stops_timer() {
    let mut sched = Scheduler::new();
    let start = Instant::now();
    let id = sched.set_interval(Task::Tick, Duration::from_secs(1), start);

    assert!(sched.is_active(id));
    assert!(sched.clear_interval(id));
    assert!(!sched.clear_interval(id));
    assert!(!sched.is_active(id));
    assert_eq!(sched.next_deadline(), None);
    assert!(sched.take_due(start + Duration::from_secs(10)).is_empty());
}
