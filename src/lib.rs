// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Step-driven sorting animation engine.
//!
//! Sortlab runs one of six instrumented sorting algorithms on a background
//! thread and publishes a [`snapshot::Snapshot`] (values plus comparing,
//! swapping and sorted index sets) at every step, so a renderer can draw
//! the sort as it happens. Runs can be paused, resumed, slowed down and
//! reset at any moment.
//!
//! # Key entry points
//!
//! - [`engine::SortEngine`] - run lifecycle, controls and snapshot feed
//! - [`algorithms::Algorithm`] - the algorithm catalogue
//! - [`emitter::StepEmitter`] - the checkpoint interface every algorithm
//!   reports through
//! - [`explain::ExplanationService`] - cached per-algorithm explanations
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Each run gets a generation number. The worker thread writes snapshot
//! updates only while its generation is current, which a reset revokes
//! atomically. The latest snapshot reaches the render thread through a
//! lock-free triple buffer; subscribers receive every frame in order.

pub mod algorithms;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod explain;
pub mod options;
pub mod sequence;
pub mod snapshot;
