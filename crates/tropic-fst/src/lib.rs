//! Weighted finite state transducer engine.
//!
//! This crate builds weighted transducers from a line-oriented text grammar
//! (or programmatically) and lazily enumerates every accepting output path
//! for an input string together with its additive (tropical) weight.
//!
//! # Architecture
//!
//! - [`label`] -- Input labels and the configurable epsilon marker
//! - [`state`] -- States and their ordered outgoing transitions
//! - [`automaton`] -- The [`Fst`] container (state arena, start state)
//! - [`observer`] -- Construction/parse event hooks and [`FstBuilder`]
//! - [`loader`] -- Text grammar loader
//! - [`config`] -- Traversal configuration (explicit DFS frame stack)
//! - [`transduce`] -- Lazy transduction over an immutable [`Fst`]
//! - [`validate`] -- Opt-in epsilon-cycle detection
//!
//! # Example
//!
//! ```
//! let fst = tropic_fst::load("0 1 a x 0.5\n1 2 c z 2.5\n2 3.5\n").unwrap();
//! let results: Vec<_> = fst.transduce("ac").collect();
//! assert_eq!(results[0].output, "xz");
//! assert_eq!(results[0].weight, 6.5);
//! ```
//!
//! The transduction engine assumes the epsilon subgraph is acyclic. An
//! epsilon cycle makes the search non-terminating; use
//! [`Fst::check_epsilon_acyclic`] to reject such automata up front.

pub mod automaton;
pub mod config;
pub mod label;
pub mod loader;
pub mod observer;
pub mod state;
pub mod transduce;
pub mod validate;

use std::path::PathBuf;

pub use automaton::{Declaration, Fst};
pub use label::Label;
pub use loader::{LoadOptions, Loader, load, load_file};
pub use observer::{BuildEvent, FstBuilder, LoadEvent, LogObserver, NoopObserver, Observer};
pub use state::{State, StateId, Transition};
pub use transduce::{Transduction, Transductions, transduce};

/// A definition line matched neither the transition nor the final-state shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line {line_number} in FST definition: {line}")]
pub struct ParseError {
    /// 1-based line number within the source text.
    pub line_number: usize,
    /// The offending line exactly as it appeared in the source.
    pub line: String,
}

/// Error type for loading and validating transducers.
#[derive(Debug, thiserror::Error)]
pub enum WfstError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("epsilon cycle through states {}", .states.join(" -> "))]
    EpsilonCycle { states: Vec<String> },
}

/// Trait for transducer traversal.
///
/// The `prepare` + `next` pattern is a coroutine-like interface: `prepare` sets up
/// the configuration for a new input, and each `next` call yields one output string
/// and its total weight. [`Transductions`] wraps the pair as an [`Iterator`].
pub trait Transducer {
    type Config;

    /// Prepare the configuration for traversing with the given input.
    fn prepare(&self, config: &mut Self::Config, input: &str);

    /// Yield the next output from the transducer.
    ///
    /// Writes the output string into `output` and returns its weight, or
    /// `None` once the search space is exhausted.
    fn next(&self, config: &mut Self::Config, output: &mut String) -> Option<f64>;
}
