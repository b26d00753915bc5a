//! Sequential task runner with a deadline and cooperative interruption.
//!
//! A [`TaskRunner`] executes its registered tasks strictly in append order on
//! one background thread while the caller blocks on a three-way race:
//! normal completion, the deadline elapsing, or an external interrupt.
//!
//! The deadline clock starts when the runner is **constructed**, not when
//! [`TaskRunner::start`] is called: registration time counts against the
//! budget, and a runner built long before it is started does not silently
//! gain extra time.
//!
//! Interruption is cooperative. The interrupt slot is checked only between
//! tasks, so a task already running always completes; on timeout the
//! background loop is abandoned, not stopped.

use crossbeam_channel::{after, bounded, select, Receiver, Sender};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// A task in the runner's ordered sequence, invoked with its zero-based index.
type SequencedTask = Box<dyn FnOnce(usize) + Send + 'static>;

/// Terminal outcomes of a run that did not complete every task.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunnerError {
    /// The deadline elapsed before the task sequence finished.
    #[error("received timeout")]
    Timeout,
    /// The interrupt slot was signaled between two tasks.
    #[error("received interrupt")]
    Interrupt,
    /// A task panicked; the sequence stopped at that task.
    #[error("task {index} failed")]
    TaskFailed {
        /// Zero-based index of the failing task.
        index: usize,
    },
}

/// Cloneable handle used to interrupt a [`TaskRunner`] from outside.
///
/// The handle replaces process-global signal subscription: whoever owns it
/// decides what counts as an interrupt (Ctrl-C, an admin endpoint, a test).
/// The underlying slot holds at most one pending signal; additional calls to
/// [`InterruptHandle::interrupt`] before the runner consumes the first are
/// dropped, and a consumed signal has no further effect on the run.
#[derive(Clone)]
pub struct InterruptHandle {
    slot: Sender<()>,
}

impl InterruptHandle {
    /// Signal the runner to stop before launching its next task.
    pub fn interrupt(&self) {
        // try_send: a full slot means a signal is already pending.
        let _ = self.slot.try_send(());
    }
}

/// Executes an ordered list of tasks under a deadline.
///
/// Not reusable: [`TaskRunner::start`] consumes the runner and returns its
/// single terminal outcome.
pub struct TaskRunner {
    tasks: Vec<SequencedTask>,
    interrupt: Receiver<()>,
    /// One-shot timer armed at construction.
    deadline: Receiver<Instant>,
}

impl TaskRunner {
    /// Create a runner whose deadline of `timeout` starts counting now, and
    /// the handle used to interrupt it.
    #[must_use]
    pub fn new(timeout: Duration) -> (Self, InterruptHandle) {
        let (interrupt_tx, interrupt_rx) = bounded(1);
        let runner = Self {
            tasks: Vec::new(),
            interrupt: interrupt_rx,
            deadline: after(timeout),
        };
        (runner, InterruptHandle { slot: interrupt_tx })
    }

    /// Append a task to the sequence. Tasks run in the order they were added,
    /// each receiving its zero-based index.
    pub fn add<T>(&mut self, task: T)
    where
        T: FnOnce(usize) + Send + 'static,
    {
        self.tasks.push(Box::new(task));
    }

    /// Run the sequence to its single terminal outcome.
    ///
    /// Blocks the calling thread until the background loop finishes, the
    /// deadline fires, or an interrupt is consumed, whichever happens first.
    ///
    /// # Errors
    ///
    /// - [`RunnerError::Timeout`]: deadline elapsed; the loop keeps running
    ///   detached but its result is abandoned.
    /// - [`RunnerError::Interrupt`]: interrupt observed between two tasks;
    ///   no further task is launched.
    /// - [`RunnerError::TaskFailed`]: a task panicked; the panic is captured
    ///   and the sequence stops there.
    pub fn start(self) -> Result<(), RunnerError> {
        let (complete_tx, complete_rx) = bounded::<Result<(), RunnerError>>(1);
        let deadline = self.deadline;
        let interrupt = self.interrupt;
        let tasks = self.tasks;

        thread::spawn(move || {
            // Capacity 1: this send succeeds even when the caller has already
            // given up on a timed-out run.
            let _ = complete_tx.send(run(tasks, &interrupt));
        });

        select! {
            recv(complete_rx) -> outcome => outcome.unwrap_or(Err(RunnerError::Timeout)),
            recv(deadline) -> _ => {
                warn!("task sequence exceeded its deadline");
                Err(RunnerError::Timeout)
            }
        }
    }
}

/// The sequential execution loop.
fn run(tasks: Vec<SequencedTask>, interrupt: &Receiver<()>) -> Result<(), RunnerError> {
    for (index, task) in tasks.into_iter().enumerate() {
        // Checked only between tasks: a started task always completes.
        if interrupt.try_recv().is_ok() {
            debug!(next_task = index, "interrupt consumed, aborting sequence");
            return Err(RunnerError::Interrupt);
        }

        debug!(index, "running task");
        if catch_unwind(AssertUnwindSafe(|| task(index))).is_err() {
            warn!(index, "task panicked");
            return Err(RunnerError::TaskFailed { index });
        }
    }
    Ok(())
}
