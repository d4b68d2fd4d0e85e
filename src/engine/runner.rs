//! Drives one algorithm run to completion or cancellation.

use std::sync::Arc;
use std::thread::JoinHandle;

use super::control::{RunControl, RunEmitter};
use crate::algorithms::Algorithm;
use crate::emitter::{Cancelled, StepEmitter};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The algorithm finished; carries the sorted values.
    Completed(Vec<u32>),
    /// The run was cancelled at a checkpoint.
    Stopped,
}

impl RunOutcome {
    /// Whether the run finished normally.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Run `algorithm` over `sequence`, reporting through `emitter`.
///
/// The emitter bundles the snapshot sink, the cancellation predicate and
/// the live delay. Cancellation is translated into [`RunOutcome::Stopped`];
/// it is the expected way to stop a run and is not reported as an error.
/// Anything else escaping the algorithm is a defect and unwinds through
/// the caller.
pub fn run(
    algorithm: Algorithm,
    sequence: &[u32],
    emitter: &mut dyn StepEmitter,
) -> RunOutcome {
    match algorithm.sort(sequence, emitter) {
        Ok(sorted) => RunOutcome::Completed(sorted),
        Err(Cancelled) => {
            log::debug!("{algorithm} run stopped at a checkpoint");
            RunOutcome::Stopped
        }
    }
}

/// Background thread executing one run generation.
pub(crate) struct Worker {
    generation: u64,
    handle: JoinHandle<RunOutcome>,
}

impl Worker {
    /// Spawn the worker thread for `generation`.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] if the thread fails to spawn.
    pub(crate) fn spawn(
        control: &Arc<RunControl>,
        algorithm: Algorithm,
        generation: u64,
        sequence: Vec<u32>,
    ) -> Result<Self, std::io::Error> {
        let control = Arc::clone(control);
        let handle = std::thread::Builder::new()
            .name("sort-runner".into())
            .spawn(move || {
                let mut emitter =
                    RunEmitter::new(Arc::clone(&control), generation);
                let outcome = run(algorithm, &sequence, &mut emitter);
                if outcome.is_completed() && control.complete(generation) {
                    log::info!(
                        "{algorithm} finished sorting {} values",
                        sequence.len()
                    );
                }
                outcome
            })?;
        Ok(Self { generation, handle })
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the thread. A panic inside the algorithm is a programming
    /// defect and is resumed on the joining thread.
    pub(crate) fn join(self) -> RunOutcome {
        match self.handle.join() {
            Ok(outcome) => outcome,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    /// Wait for the thread, swallowing a panic. Used on teardown.
    pub(crate) fn join_quietly(self) {
        if self.handle.join().is_err() {
            log::error!("sort worker for generation {} panicked", self.generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Recorder;

    #[test]
    fn completion_carries_sorted_values() {
        let mut rec = Recorder::new();
        let outcome = run(Algorithm::Heap, &[3, 9, 1], &mut rec);
        assert_eq!(outcome, RunOutcome::Completed(vec![1, 3, 9]));
        assert!(outcome.is_completed());
    }

    #[test]
    fn cancellation_is_a_normal_stop() {
        for algo in Algorithm::ALL {
            let mut rec = Recorder::new().cancel_after(3);
            assert_eq!(run(algo, &[5, 4, 3, 2, 1], &mut rec), RunOutcome::Stopped);
        }
    }

    /// Emitter whose first checkpoint hits an out-of-range write, standing
    /// in for a broken algorithm.
    struct Defective;

    impl StepEmitter for Defective {
        fn emit(
            &mut self,
            _: crate::snapshot::SnapshotPatch,
        ) -> Result<(), Cancelled> {
            let empty: Vec<u32> = Vec::new();
            let _ = empty[empty.len()];
            Ok(())
        }

        fn is_cancelled(&self) -> bool {
            false
        }

        fn current_delay(&self) -> web_time::Duration {
            web_time::Duration::ZERO
        }

        fn step(&mut self) -> Result<(), Cancelled> {
            Ok(())
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn defects_are_not_swallowed() {
        let _ = run(Algorithm::Bubble, &[2, 1], &mut Defective);
    }
}
