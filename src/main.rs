//! Headless sortlab runner.
//!
//! Drives the sort engine without a renderer and reports through the log
//! (`RUST_LOG=info` or finer).

use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;

use clap::{Parser, Subcommand};
use sortlab::algorithms::Algorithm;
use sortlab::emitter::{Recorder, TraceEvent};
use sortlab::engine::{RunState, SortEngine};
use sortlab::error::SortlabError;
use sortlab::explain::{ExplanationService, GeminiBackend};
use sortlab::options::Options;
use sortlab::snapshot::Snapshot;
use web_time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "sortlab", about = "Step-driven sorting animation engine")]
struct Cli {
    /// TOML options preset.
    #[arg(long, short, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Animate one sort headlessly, logging every frame.
    Run {
        /// Algorithm to run (e.g. `bubble`, `Quick Sort`).
        #[arg(long, short)]
        algorithm: Option<Algorithm>,
        /// Sequence size.
        #[arg(long)]
        size: Option<usize>,
        /// Delay between steps in milliseconds.
        #[arg(long)]
        delay: Option<u64>,
        /// Seed for the sequence generator.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Record every checkpoint of one algorithm on the given values.
    Trace {
        /// Algorithm to trace.
        #[arg(long, short)]
        algorithm: Algorithm,
        /// Comma-separated input values.
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        values: Vec<u32>,
    },
    /// Fetch the explanation for an algorithm.
    Explain {
        /// Algorithm to explain.
        #[arg(long, short)]
        algorithm: Algorithm,
    },
    /// Log the options JSON schema.
    Schema,
}

fn load_options(path: Option<&Path>) -> Result<Options, SortlabError> {
    path.map_or_else(|| Ok(Options::default()), Options::load)
}

fn run(
    mut options: Options,
    algorithm: Option<Algorithm>,
    size: Option<usize>,
    delay: Option<u64>,
    seed: Option<u64>,
) -> Result<(), SortlabError> {
    let playback = &mut options.playback;
    if let Some(algorithm) = algorithm {
        playback.algorithm = algorithm;
    }
    if let Some(size) = size {
        playback.size = size;
    }
    if let Some(delay) = delay {
        playback.delay_ms = delay;
    }
    playback.seed = seed.or(playback.seed);

    let mut engine = SortEngine::new(options.playback);
    log::info!(
        "{} on {} values, {:?} per step",
        engine.algorithm().label(),
        engine.size(),
        engine.delay()
    );
    log::info!("input: {:?}", engine.current().values);

    let frames = engine.subscribe();
    let started = Instant::now();
    let _ = engine.toggle()?;

    let mut count = 0usize;
    loop {
        match frames.recv_timeout(Duration::from_millis(100)) {
            Ok(frame) => {
                count += 1;
                log_frame(frame.generation, &frame.snapshot);
            }
            Err(RecvTimeoutError::Timeout) if engine.state() == RunState::Idle => {
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    count += frames.try_iter().count();

    match engine.wait() {
        Some(outcome) => log::info!(
            "{outcome:?} after {count} frames in {:.2?}",
            started.elapsed()
        ),
        None => log::warn!("no run to wait for"),
    }
    Ok(())
}

fn log_frame(generation: u64, snapshot: &Snapshot) {
    log::debug!(
        "[{generation}] cmp={:?} swp={:?} sorted={}/{}",
        snapshot.comparing,
        snapshot.swapping,
        snapshot.sorted.len(),
        snapshot.len()
    );
    log::trace!("[{generation}] {:?}", snapshot.values);
}

fn trace(algorithm: Algorithm, values: &[u32]) {
    let mut recorder = Recorder::new();
    let Ok(sorted) = algorithm.sort(values, &mut recorder) else {
        log::warn!("trace recorder cancelled the run");
        return;
    };

    let mut snapshot = Snapshot::new(values.to_vec());
    for (i, event) in recorder.events().iter().enumerate() {
        match event {
            TraceEvent::Emit(patch) => {
                snapshot.apply(patch.clone());
                log::info!(
                    "#{i} emit values={:?} cmp={:?} swp={:?} sorted={:?}",
                    snapshot.values,
                    snapshot.comparing,
                    snapshot.swapping,
                    snapshot.sorted
                );
            }
            TraceEvent::Step => log::info!("#{i} step"),
        }
    }
    log::info!(
        "{} emits, {} steps, result {sorted:?}",
        recorder.patches().count(),
        recorder.step_count()
    );
}

fn explain(options: &Options, algorithm: Algorithm) {
    let backend = GeminiBackend::new(&options.explain);
    let mut service = ExplanationService::new(backend, &options.explain);
    if !service.has_credential() {
        log::warn!(
            "no API key configured (set ${} or explain.api_key)",
            options.explain.api_key_env
        );
    }
    let info = service.explain(algorithm);
    log::info!("{}", info.name);
    log::info!("{}", info.description);
    log::info!(
        "time {} / space {}",
        info.time_complexity,
        info.space_complexity
    );
    log::info!("\n{}", info.reference_code);
}

fn dispatch(cli: Cli) -> Result<(), SortlabError> {
    let options = load_options(cli.options.as_deref())?;
    match cli.command {
        Command::Run {
            algorithm,
            size,
            delay,
            seed,
        } => run(options, algorithm, size, delay, seed)?,
        Command::Trace { algorithm, values } => trace(algorithm, &values),
        Command::Explain { algorithm } => explain(&options, algorithm),
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&Options::json_schema())
                .map_err(|e| SortlabError::OptionsParse(e.to_string()))?;
            log::info!("{schema}");
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    if let Err(e) = dispatch(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
