//! Integration tests for the sequential task runner.

use corral::config::RunnerConfig;
use corral::core::{RunnerError, TaskRunner};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn completes_all_tasks_in_order_within_the_deadline() {
    let (mut runner, _handle) = TaskRunner::new(Duration::from_secs(5));
    let order = Arc::new(Mutex::new(Vec::new()));

    for _ in 0..5 {
        let order = Arc::clone(&order);
        runner.add(move |index| order.lock().push(index));
    }

    assert_eq!(runner.start(), Ok(()));
    assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn deadline_wins_over_a_slow_task() {
    let constructed = Instant::now();
    let (mut runner, _handle) = TaskRunner::new(Duration::from_millis(100));
    runner.add(|_| std::thread::sleep(Duration::from_millis(200)));

    assert_eq!(runner.start(), Err(RunnerError::Timeout));
    // start returned at roughly the deadline, not after the task finished.
    assert!(constructed.elapsed() < Duration::from_millis(190));
}

#[test]
fn deadline_clock_starts_at_construction() {
    let (mut runner, _handle) = TaskRunner::new(Duration::from_millis(100));
    // Burn the whole budget before start is even called.
    std::thread::sleep(Duration::from_millis(120));
    runner.add(|_| {});

    assert_eq!(runner.start(), Err(RunnerError::Timeout));
}

#[test]
fn interrupt_between_tasks_stops_the_sequence() {
    let (mut runner, handle) = TaskRunner::new(Duration::from_secs(5));
    let ran = Arc::new(Mutex::new(Vec::new()));

    for index in 0..5 {
        let ran = Arc::clone(&ran);
        let handle = handle.clone();
        runner.add(move |id| {
            ran.lock().push(id);
            // Signal from inside task 1: consumed before task 2 launches.
            if index == 1 {
                handle.interrupt();
            }
        });
    }

    assert_eq!(runner.start(), Err(RunnerError::Interrupt));
    assert_eq!(*ran.lock(), vec![0, 1]);
}

#[test]
fn interrupt_before_start_prevents_any_task() {
    let (mut runner, handle) = TaskRunner::new(Duration::from_secs(5));
    let ran = Arc::new(Mutex::new(Vec::new()));
    for _ in 0..3 {
        let ran = Arc::clone(&ran);
        runner.add(move |id| ran.lock().push(id));
    }

    handle.interrupt();
    assert_eq!(runner.start(), Err(RunnerError::Interrupt));
    assert!(ran.lock().is_empty());
}

#[test]
fn runner_config_supplies_the_deadline() {
    let config = RunnerConfig::new(5_000);
    assert!(config.validate().is_ok());

    let (mut runner, _handle) = TaskRunner::new(config.deadline());
    runner.add(|_| {});
    assert_eq!(runner.start(), Ok(()));
}
