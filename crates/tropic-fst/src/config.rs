// Traversal configuration: explicit DFS frame stack.
//
// One frame per edge of the current path. The stack is the whole resumable
// state of a transduction, so a search can be suspended after any result and
// continued by the next `next` call.

use crate::state::StateId;

/// Where a frame is in the exploration of its state.
///
/// Phases run in order: acceptance test, consuming transitions, epsilon
/// transitions. Whether input remains is decided once, when leaving
/// `Accept`; the character to consume is carried in the phase itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Phase {
    Accept,
    /// Next transition index to try for input character `ch`.
    Consume { ch: char, next: usize },
    /// Next transition index to try as an epsilon transition.
    Epsilon { next: usize },
}

/// A `(state, remaining input)` search node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Frame {
    pub state: StateId,
    /// Number of input characters consumed on the path to this frame.
    pub input_depth: usize,
    /// Index of the parent's transition that led here; `None` for the root.
    pub via: Option<usize>,
    pub phase: Phase,
}

impl Frame {
    pub(crate) fn new(state: StateId, input_depth: usize, via: Option<usize>) -> Self {
        Self {
            state,
            input_depth,
            via,
            phase: Phase::Accept,
        }
    }
}

/// Traversal configuration for [`crate::Fst`].
///
/// Buffers are reused across `prepare` calls, so one configuration can serve
/// many transductions over the same automaton.
#[derive(Debug, Clone, Default)]
pub struct TraversalConfig {
    /// Input characters of the current transduction.
    pub(crate) input: Vec<char>,
    pub(crate) frames: Vec<Frame>,
    pub(crate) steps: u64,
}

impl TraversalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all traversal state (called at the start of `prepare`).
    #[inline]
    pub fn reset(&mut self) {
        self.input.clear();
        self.frames.clear();
        self.steps = 0;
    }

    /// Number of search frames expanded since the last `prepare`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Current path length (0 once the search is exhausted).
    pub fn stack_depth(&self) -> usize {
        self.frames.len()
    }

    pub fn input_length(&self) -> usize {
        self.input.len()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
        self.steps += 1;
    }
}
