// Automaton container: state arena, name index, start state.

use hashbrown::HashMap;

use crate::label::Label;
use crate::state::{State, StateId};

/// Result of declaring a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// The state did not exist and was created with the given attributes.
    Created(StateId),
    /// The state existed only implicitly and took the given attributes.
    Promoted(StateId),
    /// The state was already declared; nothing changed.
    Unchanged(StateId),
}

impl Declaration {
    pub fn id(self) -> StateId {
        match self {
            Declaration::Created(id) | Declaration::Promoted(id) | Declaration::Unchanged(id) => id,
        }
    }
}

/// Weighted finite state transducer.
///
/// States live in an arena addressed by [`StateId`]; names map to ids. The
/// start state is whichever state was created first, explicitly or by being
/// referenced from a transition, and is never reassigned.
///
/// Construction never fails: unknown states referenced by transitions are
/// created on demand as non-final states with zero final weight.
#[derive(Clone, Default)]
pub struct Fst {
    states: Vec<State>,
    index: HashMap<String, StateId>,
    start: Option<StateId>,
}

impl std::fmt::Debug for Fst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fst")
            .field("states", &self.states.iter().map(State::name).collect::<Vec<_>>())
            .field("start_state", &self.start.map(|id| self.states[id.index()].name()))
            .field("transition_count", &self.transition_count())
            .finish()
    }
}

impl Fst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state.
    ///
    /// First declaration wins. Redeclaring an explicitly declared state leaves
    /// it untouched even when the arguments differ. A state that so far exists
    /// only because a transition referenced it takes the attributes of its
    /// first explicit declaration.
    pub fn declare_state(&mut self, name: &str, is_final: bool, final_weight: f64) -> Declaration {
        match self.state_id(name) {
            Some(id) => {
                if self.states[id.index()].declare(is_final, final_weight) {
                    Declaration::Promoted(id)
                } else {
                    Declaration::Unchanged(id)
                }
            }
            None => Declaration::Created(self.insert(State::explicit(name, is_final, final_weight))),
        }
    }

    /// Declare a non-final state with zero final weight.
    pub fn add_state(&mut self, name: &str) -> StateId {
        self.declare_state(name, false, 0.0).id()
    }

    /// Add a transition `from --input:output/weight--> to`.
    ///
    /// `from` and then `to` are created implicitly if absent.
    pub fn add_transition(
        &mut self,
        from: &str,
        input: impl Into<Label>,
        output: &str,
        to: &str,
        weight: f64,
    ) {
        let (from, _) = self.ensure_state(from);
        let (to, _) = self.ensure_state(to);
        self.connect(from, input.into(), output, to, weight);
    }

    /// Look up a state by name, creating it implicitly if absent.
    ///
    /// Returns the id and whether the state was created.
    pub(crate) fn ensure_state(&mut self, name: &str) -> (StateId, bool) {
        match self.state_id(name) {
            Some(id) => (id, false),
            None => (self.insert(State::implicit(name)), true),
        }
    }

    pub(crate) fn connect(&mut self, from: StateId, input: Label, output: &str, to: StateId, weight: f64) {
        self.states[from.index()].add_outgoing(input, output, to, weight);
    }

    fn insert(&mut self, state: State) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.index.insert(state.name().to_string(), id);
        self.states.push(state);
        if self.start.is_none() {
            self.start = Some(id);
        }
        id
    }

    /// The start state, or `None` for an automaton without states.
    pub fn start_state(&self) -> Option<StateId> {
        self.start
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    pub fn state_by_name(&self, name: &str) -> Option<&State> {
        self.state_id(name).map(|id| self.state(id))
    }

    /// All states in creation order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId(i as u32), s))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions().len()).sum()
    }
}
