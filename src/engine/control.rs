//! State shared between the control side and the sort worker.
//!
//! A single mutex guards the lifecycle state, the run generation and the
//! snapshot, so "is this run still current?" and "apply its patch" happen
//! atomically. A superseded run can therefore never overwrite data that a
//! reset or a newer run has published. The condition variable wakes
//! paused emits and delay sleeps whenever the lifecycle changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Condvar, Mutex, MutexGuard, PoisonError};

use web_time::{Duration, Instant};

use super::lifecycle::{RunEvent, RunState};
use crate::emitter::{Cancelled, StepEmitter};
use crate::snapshot::{Snapshot, SnapshotPatch};

/// One published snapshot, tagged with the generation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Run generation at publish time.
    pub generation: u64,
    /// Full snapshot after the update.
    pub snapshot: Snapshot,
}

struct ControlState {
    generation: u64,
    run: RunState,
    snapshot: Snapshot,
    latest: triple_buffer::Input<Snapshot>,
    subscribers: Vec<mpsc::Sender<Frame>>,
}

impl ControlState {
    fn is_current(&self, generation: u64) -> bool {
        self.run.is_active() && self.generation == generation
    }

    /// Push the snapshot to the render buffer and every live subscriber.
    fn publish(&mut self) {
        self.latest.write(self.snapshot.clone());
        let frame = Frame {
            generation: self.generation,
            snapshot: self.snapshot.clone(),
        };
        self.subscribers.retain(|tx| tx.send(frame.clone()).is_ok());
    }
}

pub(crate) struct RunControl {
    state: Mutex<ControlState>,
    wake: Condvar,
    delay_ms: AtomicU64,
    pause_poll: Duration,
}

impl RunControl {
    pub(crate) fn new(
        snapshot: Snapshot,
        delay: Duration,
        pause_poll: Duration,
    ) -> (Self, triple_buffer::Output<Snapshot>) {
        let (latest, output) = triple_buffer::triple_buffer(&snapshot);
        let control = Self {
            state: Mutex::new(ControlState {
                generation: 0,
                run: RunState::Idle,
                snapshot,
                latest,
                subscribers: Vec::new(),
            }),
            wake: Condvar::new(),
            delay_ms: AtomicU64::new(millis(delay)),
            pause_poll,
        };
        (control, output)
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_for<'a>(
        &self,
        guard: MutexGuard<'a, ControlState>,
        timeout: Duration,
    ) -> MutexGuard<'a, ControlState> {
        self.wake
            .wait_timeout(guard, timeout)
            .map_or_else(|e| e.into_inner().0, |(guard, _)| guard)
    }

    pub(crate) fn run_state(&self) -> RunState {
        self.lock().run
    }

    pub(crate) fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub(crate) fn current(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    pub(crate) fn subscribe(&self) -> mpsc::Receiver<Frame> {
        let (tx, rx) = mpsc::channel();
        self.lock().subscribers.push(tx);
        rx
    }

    pub(crate) fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.load(Ordering::Acquire))
    }

    pub(crate) fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(millis(delay), Ordering::Release);
    }

    /// Idle -> Running under a new generation. Clears the highlight and
    /// sorted sets, keeps the values. Returns the generation and the
    /// values the run starts from.
    pub(crate) fn begin(&self) -> (u64, Vec<u32>) {
        let mut state = self.lock();
        state.generation += 1;
        state.run = RunState::Idle.next(RunEvent::Toggle);
        state.snapshot.clear_marks();
        state.publish();
        (state.generation, state.snapshot.values.clone())
    }

    /// Flip Running <-> Paused. `None` when no run is active.
    pub(crate) fn toggle_pause(&self) -> Option<RunState> {
        let mut state = self.lock();
        if !state.run.is_active() {
            return None;
        }
        let next = state.run.next(RunEvent::Toggle);
        state.run = next;
        drop(state);
        self.wake.notify_all();
        Some(next)
    }

    /// Invalidate any run and install a fresh sequence. Returns the new
    /// generation.
    pub(crate) fn reset(&self, values: Vec<u32>) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.run = state.run.next(RunEvent::Reset);
        state.snapshot = Snapshot::new(values);
        state.publish();
        let generation = state.generation;
        drop(state);
        self.wake.notify_all();
        generation
    }

    /// Invalidate any run, keeping the current snapshot.
    pub(crate) fn cancel(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.run = state.run.next(RunEvent::Reset);
        drop(state);
        self.wake.notify_all();
    }

    /// Natural completion of `generation`. Only takes effect if that run
    /// is still the current one.
    pub(crate) fn complete(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if !state.is_current(generation) {
            return false;
        }
        state.run = state.run.next(RunEvent::Completed);
        drop(state);
        self.wake.notify_all();
        true
    }
}

fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// The controller's emit adapter for one run generation.
pub(crate) struct RunEmitter {
    control: Arc<RunControl>,
    generation: u64,
}

impl RunEmitter {
    pub(crate) fn new(control: Arc<RunControl>, generation: u64) -> Self {
        Self {
            control,
            generation,
        }
    }
}

impl StepEmitter for RunEmitter {
    fn emit(&mut self, patch: SnapshotPatch) -> Result<(), Cancelled> {
        let mut state = self.control.lock();
        loop {
            if !state.is_current(self.generation) {
                return Err(Cancelled);
            }
            if state.run != RunState::Paused {
                break;
            }
            state = self.control.wait_for(state, self.control.pause_poll);
        }
        state.snapshot.apply(patch);
        state.publish();
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        !self.control.lock().is_current(self.generation)
    }

    fn current_delay(&self) -> Duration {
        self.control.delay()
    }

    /// Time spent paused does not count against the delay.
    fn step(&mut self) -> Result<(), Cancelled> {
        let delay = self.current_delay();
        let mut remaining = delay;
        let mut state = self.control.lock();
        loop {
            if !state.is_current(self.generation) {
                return Err(Cancelled);
            }
            if state.run == RunState::Paused {
                state = self.control.wait_for(state, self.control.pause_poll);
                continue;
            }
            if remaining.is_zero() {
                break;
            }
            let started = Instant::now();
            state = self.control.wait_for(state, remaining);
            remaining = remaining.saturating_sub(started.elapsed());
        }
        drop(state);
        if delay.is_zero() {
            std::thread::yield_now();
        }
        Ok(())
    }
}
