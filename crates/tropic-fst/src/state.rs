// States and weighted transitions.

use crate::label::Label;

/// Index of a state within its owning [`crate::Fst`].
///
/// Ids are only handed out by the container, so every transition target
/// refers to a state of the same automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u32);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A weighted transition `input:output/weight -> target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub input: Label,
    /// Appended verbatim to the output when the transition is taken.
    pub output: String,
    pub target: StateId,
    pub weight: f64,
}

/// How a state came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// Created as a side effect of referencing it from a transition.
    Implicit,
    /// Declared through `declare_state`.
    Explicit,
}

/// An automaton state with its ordered outgoing transitions.
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    is_final: bool,
    final_weight: f64,
    origin: Origin,
    transitions: Vec<Transition>,
}

impl State {
    pub(crate) fn implicit(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_final: false,
            final_weight: 0.0,
            origin: Origin::Implicit,
            transitions: Vec::new(),
        }
    }

    pub(crate) fn explicit(name: &str, is_final: bool, final_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            is_final,
            final_weight,
            origin: Origin::Explicit,
            transitions: Vec::new(),
        }
    }

    /// Apply a declaration to an existing state.
    ///
    /// First explicit declaration wins: an implicitly created state takes the
    /// attributes of its first explicit declaration, after which the state is
    /// frozen. Returns `true` if the attributes were taken.
    pub(crate) fn declare(&mut self, is_final: bool, final_weight: f64) -> bool {
        match self.origin {
            Origin::Explicit => false,
            Origin::Implicit => {
                self.is_final = is_final;
                self.final_weight = final_weight;
                self.origin = Origin::Explicit;
                true
            }
        }
    }

    /// Append a transition. Several transitions may share an input label.
    pub(crate) fn add_outgoing(&mut self, input: Label, output: &str, target: StateId, weight: f64) {
        self.transitions.push(Transition {
            input,
            output: output.to_string(),
            target,
            weight,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn final_weight(&self) -> f64 {
        self.final_weight
    }

    /// Whether the state has been explicitly declared (and is therefore frozen).
    pub fn is_declared(&self) -> bool {
        self.origin == Origin::Explicit
    }

    /// Outgoing transitions in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}
