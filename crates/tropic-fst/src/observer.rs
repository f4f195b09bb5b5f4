// Construction and parse event hooks.
//
// The core never prints. Builders and the loader report what they do through
// an `Observer`; `NoopObserver` is the default and `LogObserver` forwards to
// the `log` facade.

use crate::automaton::{Declaration, Fst};
use crate::label::Label;
use crate::state::StateId;

/// Event emitted while an automaton is being built.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent<'a> {
    /// A new state was created, either explicitly or by a transition reference.
    StateAdded {
        name: &'a str,
        is_final: bool,
        final_weight: f64,
    },
    /// The first state of the automaton became its start state.
    StartStateSet { name: &'a str },
    /// An implicitly created state took the attributes of its first declaration.
    StatePromoted {
        name: &'a str,
        is_final: bool,
        final_weight: f64,
    },
    /// A declaration for an already declared state was ignored.
    DuplicateState { name: &'a str },
    TransitionAdded {
        from: &'a str,
        input: &'a Label,
        output: &'a str,
        to: &'a str,
        weight: f64,
    },
}

/// Event emitted by the grammar loader, one per non-blank line.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent<'a> {
    TransitionLine {
        line_number: usize,
        from: &'a str,
        to: &'a str,
        input: &'a Label,
        output: &'a str,
        weight: f64,
    },
    FinalStateLine {
        line_number: usize,
        state: &'a str,
        weight: f64,
    },
    /// A comment line.
    Skipped { line_number: usize },
}

/// Receiver for construction and parse events. All methods default to no-ops.
pub trait Observer {
    fn on_build(&mut self, _event: &BuildEvent<'_>) {}

    fn on_load(&mut self, _event: &LoadEvent<'_>) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_build(&mut self, event: &BuildEvent<'_>) {
        (**self).on_build(event);
    }

    fn on_load(&mut self, event: &LoadEvent<'_>) {
        (**self).on_load(event);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Observer that forwards events to the [`log`] facade.
///
/// Construction events are logged at `debug`, per-line parse events at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_build(&mut self, event: &BuildEvent<'_>) {
        match event {
            BuildEvent::StateAdded {
                name,
                is_final,
                final_weight,
            } => log::debug!("added state {name}, is_final={is_final}, final_weight={final_weight}"),
            BuildEvent::StartStateSet { name } => log::debug!("set start state {name}"),
            BuildEvent::StatePromoted {
                name,
                is_final,
                final_weight,
            } => log::debug!("declared state {name}, is_final={is_final}, final_weight={final_weight}"),
            BuildEvent::DuplicateState { name } => log::debug!("state {name} already declared"),
            BuildEvent::TransitionAdded {
                from,
                input,
                output,
                to,
                weight,
            } => log::debug!("added transition {from} --{input}/{output}, {weight}--> {to}"),
        }
    }

    fn on_load(&mut self, event: &LoadEvent<'_>) {
        match event {
            LoadEvent::TransitionLine {
                line_number,
                from,
                to,
                input,
                output,
                weight,
            } => log::trace!("line {line_number}: transition {from} -> {to}, {input}/{output}, weight {weight}"),
            LoadEvent::FinalStateLine {
                line_number,
                state,
                weight,
            } => log::trace!("line {line_number}: final state {state}, weight {weight}"),
            LoadEvent::Skipped { line_number } => log::trace!("line {line_number}: comment"),
        }
    }
}

/// Builds an [`Fst`] while reporting each mutation to an [`Observer`].
pub struct FstBuilder<O = NoopObserver> {
    fst: Fst,
    observer: O,
}

impl FstBuilder<NoopObserver> {
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }
}

impl Default for FstBuilder<NoopObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Observer> FstBuilder<O> {
    pub fn with_observer(observer: O) -> Self {
        Self::extend(Fst::new(), observer)
    }

    /// Continue building an existing automaton.
    pub fn extend(fst: Fst, observer: O) -> Self {
        Self { fst, observer }
    }

    /// See [`Fst::declare_state`].
    pub fn declare_state(&mut self, name: &str, is_final: bool, final_weight: f64) -> Declaration {
        let declaration = self.fst.declare_state(name, is_final, final_weight);
        match declaration {
            Declaration::Created(id) => self.report_created(id),
            Declaration::Promoted(_) => self.observer.on_build(&BuildEvent::StatePromoted {
                name,
                is_final,
                final_weight,
            }),
            Declaration::Unchanged(_) => self.observer.on_build(&BuildEvent::DuplicateState { name }),
        }
        declaration
    }

    /// See [`Fst::add_transition`].
    pub fn add_transition(
        &mut self,
        from: &str,
        input: impl Into<Label>,
        output: &str,
        to: &str,
        weight: f64,
    ) {
        let input = input.into();
        let from_id = self.ensure_state(from);
        let to_id = self.ensure_state(to);
        self.observer.on_build(&BuildEvent::TransitionAdded {
            from,
            input: &input,
            output,
            to,
            weight,
        });
        self.fst.connect(from_id, input, output, to_id, weight);
    }

    fn ensure_state(&mut self, name: &str) -> StateId {
        let (id, created) = self.fst.ensure_state(name);
        if created {
            self.report_created(id);
        }
        id
    }

    fn report_created(&mut self, id: StateId) {
        let state = self.fst.state(id);
        self.observer.on_build(&BuildEvent::StateAdded {
            name: state.name(),
            is_final: state.is_final(),
            final_weight: state.final_weight(),
        });
        if self.fst.start_state() == Some(id) {
            self.observer.on_build(&BuildEvent::StartStateSet { name: state.name() });
        }
    }

    pub(crate) fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// The automaton built so far.
    pub fn fst(&self) -> &Fst {
        &self.fst
    }

    pub fn finish(self) -> Fst {
        self.fst
    }
}
