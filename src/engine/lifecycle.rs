//! Run lifecycle: `Idle -> Running -> {Paused <-> Running} -> Idle`.

/// Where the engine is in its run lifecycle.
///
/// `Running` and `Paused` both count as an active run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No run in progress.
    #[default]
    Idle,
    /// A run is advancing.
    Running,
    /// A run exists but is blocked at its next emit.
    Paused,
}

/// Something that moves the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    /// Start/pause/resume control.
    Toggle,
    /// Reset control. Valid from every state.
    Reset,
    /// The algorithm returned normally.
    Completed,
}

impl RunState {
    /// Whether a run exists (running or paused).
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// State after `event`.
    #[must_use]
    pub fn next(self, event: RunEvent) -> Self {
        match (self, event) {
            (_, RunEvent::Reset | RunEvent::Completed) => Self::Idle,
            (Self::Idle | Self::Paused, RunEvent::Toggle) => Self::Running,
            (Self::Running, RunEvent::Toggle) => Self::Paused,
        }
    }
}
