//! The step protocol every sorting algorithm reports progress through.
//!
//! Algorithms never touch the shared snapshot or the clock directly. They
//! receive a [`StepEmitter`] and call it at every visualizable event:
//!
//! - [`emit`](StepEmitter::emit) whenever values are inspected or written,
//! - [`step`](StepEmitter::step) to pace each unit of work.
//!
//! Both are checkpoints: they fail with [`Cancelled`] once the run has been
//! superseded, and algorithms propagate that with `?` through every
//! recursive frame.

use std::fmt;

use web_time::Duration;

use crate::snapshot::SnapshotPatch;

/// The run was cancelled (reset or superseded) at a checkpoint.
///
/// This is the expected way for a run to end early, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sort run cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Capabilities handed to a sorting algorithm for one run.
pub trait StepEmitter {
    /// Merge `patch` into the shared snapshot.
    ///
    /// Checks cancellation first, then blocks while the run is paused
    /// (remaining cancellable), then applies the patch.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the run is cancelled before or while
    /// waiting; the patch is then discarded.
    fn emit(&mut self, patch: SnapshotPatch) -> Result<(), Cancelled>;

    /// Current cancellation state.
    fn is_cancelled(&self) -> bool;

    /// Live animation delay. Read fresh at every step.
    fn current_delay(&self) -> Duration;

    /// Fail fast if cancelled, then wait [`current_delay`](Self::current_delay).
    ///
    /// Blocks while the run is paused, like [`emit`](Self::emit).
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the run is cancelled before or during the
    /// wait.
    fn step(&mut self) -> Result<(), Cancelled>;
}

/// One checkpoint observed by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A patch was emitted.
    Emit(SnapshotPatch),
    /// A pacing step was taken.
    Step,
}

/// In-memory [`StepEmitter`] that records every checkpoint and never
/// sleeps.
///
/// Used for offline traces of an algorithm and in tests. An optional
/// checkpoint budget makes it report cancellation once exhausted.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Vec<TraceEvent>,
    budget: Option<usize>,
    delay: Duration,
}

impl Recorder {
    /// Recorder with an unlimited checkpoint budget and zero delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel after `checkpoints` successful emit/step calls.
    #[must_use]
    pub fn cancel_after(mut self, checkpoints: usize) -> Self {
        self.budget = Some(checkpoints);
        self
    }

    /// Report `delay` from [`StepEmitter::current_delay`]. Never slept on.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every recorded checkpoint, in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Only the emitted patches, in order.
    pub fn patches(&self) -> impl Iterator<Item = &SnapshotPatch> {
        self.events.iter().filter_map(|e| match e {
            TraceEvent::Emit(p) => Some(p),
            TraceEvent::Step => None,
        })
    }

    /// Number of pacing steps taken.
    pub fn step_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Step))
            .count()
    }

    fn checkpoint(&mut self) -> Result<(), Cancelled> {
        match self.budget.as_mut() {
            Some(0) => Err(Cancelled),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl StepEmitter for Recorder {
    fn emit(&mut self, patch: SnapshotPatch) -> Result<(), Cancelled> {
        self.checkpoint()?;
        self.events.push(TraceEvent::Emit(patch));
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.budget == Some(0)
    }

    fn current_delay(&self) -> Duration {
        self.delay
    }

    fn step(&mut self) -> Result<(), Cancelled> {
        self.checkpoint()?;
        self.events.push(TraceEvent::Step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_order() {
        let mut rec = Recorder::new();
        rec.emit(SnapshotPatch::new().comparing([0, 1])).unwrap();
        rec.step().unwrap();
        rec.emit(SnapshotPatch::new().swapping([0])).unwrap();

        assert_eq!(rec.events().len(), 3);
        assert_eq!(rec.events()[1], TraceEvent::Step);
        assert_eq!(rec.patches().count(), 2);
        assert_eq!(rec.step_count(), 1);
    }

    #[test]
    fn budget_exhaustion_cancels() {
        let mut rec = Recorder::new().cancel_after(2);
        assert!(!rec.is_cancelled());
        rec.step().unwrap();
        rec.emit(SnapshotPatch::new()).unwrap();
        assert!(rec.is_cancelled());
        assert_eq!(rec.step(), Err(Cancelled));
        assert_eq!(rec.emit(SnapshotPatch::new()), Err(Cancelled));
        // Rejected checkpoints are not recorded.
        assert_eq!(rec.events().len(), 2);
    }

    #[test]
    fn delay_is_reported_not_slept() {
        let rec = Recorder::new().with_delay(Duration::from_secs(60));
        assert_eq!(rec.current_delay(), Duration::from_secs(60));
    }
}
