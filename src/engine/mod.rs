//! The sorting-animation engine.
//!
//! [`SortEngine`] owns the sequence, the lifecycle and at most one
//! background worker running an [`Algorithm`]. Control actions come from
//! the UI thread ([`toggle`](SortEngine::toggle),
//! [`reset`](SortEngine::reset), [`set_delay`](SortEngine::set_delay));
//! the worker suspends at every emit/step checkpoint, where pause and
//! cancellation are observed.
//!
//! Every run is tagged with a generation. Reset bumps the generation before
//! publishing the fresh sequence, and the worker's emit adapter only writes
//! while its own generation is current, so a cancelled run cannot leak a
//! stale update into the new state.
//!
//! # Observing
//!
//! - [`snapshot`](SortEngine::snapshot): latest published frame through a
//!   lock-free triple buffer, for render loops.
//! - [`subscribe`](SortEngine::subscribe): every published frame, in emit
//!   order.

mod control;
pub mod lifecycle;
pub mod runner;

use std::sync::{mpsc, Arc};

pub use control::Frame;
pub use lifecycle::{RunEvent, RunState};
pub use runner::{run, RunOutcome};
use web_time::Duration;

use self::control::RunControl;
use self::runner::Worker;
use crate::algorithms::Algorithm;
use crate::error::SortlabError;
use crate::options::PlaybackOptions;
use crate::sequence::SequenceGenerator;
use crate::snapshot::Snapshot;

/// Interactive sorting animation: sequence, lifecycle and worker.
pub struct SortEngine {
    control: Arc<RunControl>,
    latest: triple_buffer::Output<Snapshot>,
    playback: PlaybackOptions,
    generator: SequenceGenerator,
    worker: Option<Worker>,
}

impl SortEngine {
    /// Engine in the `Idle` state with a freshly generated sequence.
    pub fn new(mut playback: PlaybackOptions) -> Self {
        let mut generator = playback
            .seed
            .map_or_else(SequenceGenerator::new, SequenceGenerator::seeded);
        playback.size = playback.clamp_size(playback.size);
        let values = generator.generate(playback.size);
        let (control, latest) = RunControl::new(
            Snapshot::new(values),
            playback.delay(),
            playback.pause_poll(),
        );
        Self {
            control: Arc::new(control),
            latest,
            playback,
            generator,
            worker: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.control.run_state()
    }

    /// Current run generation. Bumped by every start and reset.
    pub fn generation(&self) -> u64 {
        self.control.generation()
    }

    /// Algorithm used by the next run.
    pub fn algorithm(&self) -> Algorithm {
        self.playback.algorithm
    }

    /// Length of generated sequences. A sequence given to
    /// [`load_sequence`](Self::load_sequence) keeps its own length until
    /// the next reset; use [`current`](Self::current) for that.
    pub fn size(&self) -> usize {
        self.playback.size
    }

    /// Live animation delay.
    pub fn delay(&self) -> Duration {
        self.control.delay()
    }

    /// Start, pause or resume, depending on the current state.
    ///
    /// Returns the state after the transition.
    ///
    /// # Errors
    ///
    /// Returns [`SortlabError::ThreadSpawn`] if a new run cannot start its
    /// worker; the engine stays `Idle`.
    pub fn toggle(&mut self) -> Result<RunState, SortlabError> {
        if let Some(state) = self.control.toggle_pause() {
            log::debug!("run {} now {state:?}", self.control.generation());
            return Ok(state);
        }
        self.start()
    }

    fn start(&mut self) -> Result<RunState, SortlabError> {
        self.reap();
        let (generation, values) = self.control.begin();
        let algorithm = self.playback.algorithm;
        match Worker::spawn(&self.control, algorithm, generation, values) {
            Ok(worker) => {
                log::debug!("run {generation} started: {algorithm}");
                self.worker = Some(worker);
                Ok(RunState::Running)
            }
            Err(e) => {
                self.control.cancel();
                Err(SortlabError::ThreadSpawn(e))
            }
        }
    }

    /// Join a finished or cancelled worker before starting another one, so
    /// only one run ever executes.
    fn reap(&mut self) {
        if let Some(worker) = self.worker.take() {
            let generation = worker.generation();
            let outcome = worker.join();
            log::debug!("reaped run {generation}: {outcome:?}");
        }
    }

    /// Cancel any run and replace the sequence with a fresh one. Valid in
    /// every state; repeated calls keep the engine `Idle`.
    pub fn reset(&mut self) {
        let values = self.generator.generate(self.playback.size);
        let generation = self.control.reset(values);
        log::debug!("reset to generation {generation}");
    }

    /// Change the animation delay, clamped to the configured bounds. Takes
    /// effect at the running algorithm's next step.
    pub fn set_delay(&mut self, delay: Duration) -> Duration {
        let delay = self.playback.clamp_delay(delay);
        self.control.set_delay(delay);
        delay
    }

    /// Change the sequence size and regenerate. Returns the clamped size.
    ///
    /// # Errors
    ///
    /// Returns [`SortlabError::RunActive`] while a run is active.
    pub fn set_size(&mut self, size: usize) -> Result<usize, SortlabError> {
        self.ensure_idle("resize")?;
        self.playback.size = self.playback.clamp_size(size);
        self.reset();
        Ok(self.playback.size)
    }

    /// Choose the algorithm for the next run.
    ///
    /// # Errors
    ///
    /// Returns [`SortlabError::RunActive`] while a run is active.
    pub fn set_algorithm(
        &mut self,
        algorithm: Algorithm,
    ) -> Result<(), SortlabError> {
        self.ensure_idle("change algorithm")?;
        self.playback.algorithm = algorithm;
        Ok(())
    }

    /// Replace the sequence with caller-provided values (not clamped to
    /// the size bounds).
    ///
    /// # Errors
    ///
    /// Returns [`SortlabError::RunActive`] while a run is active.
    pub fn load_sequence(
        &mut self,
        values: Vec<u32>,
    ) -> Result<(), SortlabError> {
        self.ensure_idle("load a sequence")?;
        let _ = self.control.reset(values);
        Ok(())
    }

    fn ensure_idle(&self, action: &str) -> Result<(), SortlabError> {
        if self.state().is_active() {
            log::warn!("cannot {action} while a sort is in progress");
            return Err(SortlabError::RunActive);
        }
        Ok(())
    }

    /// Latest published snapshot (lock-free, may lag the worker by one
    /// publish).
    pub fn snapshot(&mut self) -> &Snapshot {
        self.latest.read()
    }

    /// Snapshot read under the control lock.
    pub fn current(&self) -> Snapshot {
        self.control.current()
    }

    /// Ordered stream of every frame published from now on.
    pub fn subscribe(&self) -> mpsc::Receiver<Frame> {
        self.control.subscribe()
    }

    /// Block until the current worker exits and return its outcome.
    /// `None` if no run was started since the last wait.
    pub fn wait(&mut self) -> Option<RunOutcome> {
        self.worker.take().map(Worker::join)
    }
}

impl Drop for SortEngine {
    fn drop(&mut self) {
        self.control.cancel();
        if let Some(worker) = self.worker.take() {
            worker.join_quietly();
        }
    }
}

impl std::fmt::Debug for SortEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortEngine")
            .field("state", &self.state())
            .field("generation", &self.generation())
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}
