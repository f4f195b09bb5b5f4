// Lazy transduction over an immutable automaton.
//
// Depth-first search over (state, remaining input) pairs driven by the
// explicit frame stack in `TraversalConfig`. Results come out in the order of
// the recursive formulation: acceptance at a node first, then the subtrees of
// its consuming transitions, then those of its epsilon transitions, each in
// declaration order.
//
// Precondition: the epsilon subgraph is acyclic. The search does not detect
// epsilon cycles and never terminates on one.

use std::iter::FusedIterator;

use crate::Transducer;
use crate::automaton::Fst;
use crate::config::{Frame, Phase, TraversalConfig};

/// One accepting path: its concatenated output and total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Transduction {
    pub output: String,
    pub weight: f64,
}

impl Fst {
    /// Create a new configuration suitable for this transducer.
    pub fn new_config(&self) -> TraversalConfig {
        TraversalConfig::new()
    }

    /// Lazily enumerate every accepting path for `input`.
    pub fn transduce<'a>(&'a self, input: &str) -> Transductions<'a> {
        transduce(self, input)
    }

    /// Write the output of the current path into `output` and return the
    /// path weight: the final weight of the last state plus every
    /// transition weight, accumulated from the deepest edge outwards.
    fn emit(&self, config: &TraversalConfig, final_weight: f64, output: &mut String) -> f64 {
        output.clear();
        for pair in config.frames.windows(2) {
            if let Some(via) = pair[1].via {
                output.push_str(&self.state(pair[0].state).transitions()[via].output);
            }
        }

        let mut total = final_weight;
        for pair in config.frames.windows(2).rev() {
            if let Some(via) = pair[1].via {
                total = self.state(pair[0].state).transitions()[via].weight + total;
            }
        }
        total
    }
}

impl Transducer for Fst {
    type Config = TraversalConfig;

    /// Prepare for traversing `input` from the start state.
    ///
    /// An automaton without states leaves the configuration exhausted.
    fn prepare(&self, config: &mut Self::Config, input: &str) {
        config.reset();
        config.input.extend(input.chars());
        if let Some(start) = self.start_state() {
            config.push(Frame::new(start, 0, None));
        }
    }

    fn next(&self, config: &mut Self::Config, output: &mut String) -> Option<f64> {
        loop {
            let top = config.frames.len().checked_sub(1)?;
            let frame = config.frames[top];
            let state = self.state(frame.state);
            let transitions = state.transitions();

            match frame.phase {
                Phase::Accept => {
                    let remaining = config.input.get(frame.input_depth).copied();
                    config.frames[top].phase = match remaining {
                        Some(ch) => Phase::Consume { ch, next: 0 },
                        None => Phase::Epsilon { next: 0 },
                    };
                    if remaining.is_none() && state.is_final() {
                        return Some(self.emit(config, state.final_weight(), output));
                    }
                }
                Phase::Consume { ch, next } => {
                    let found = transitions[next..]
                        .iter()
                        .position(|t| t.input.matches(ch))
                        .map(|offset| next + offset);
                    match found {
                        Some(index) => {
                            config.frames[top].phase = Phase::Consume { ch, next: index + 1 };
                            let target = transitions[index].target;
                            config.push(Frame::new(target, frame.input_depth + 1, Some(index)));
                        }
                        None => config.frames[top].phase = Phase::Epsilon { next: 0 },
                    }
                }
                Phase::Epsilon { next } => {
                    let found = transitions[next..]
                        .iter()
                        .position(|t| t.input.is_epsilon())
                        .map(|offset| next + offset);
                    match found {
                        Some(index) => {
                            config.frames[top].phase = Phase::Epsilon { next: index + 1 };
                            let target = transitions[index].target;
                            config.push(Frame::new(target, frame.input_depth, Some(index)));
                        }
                        None => {
                            config.frames.pop();
                        }
                    }
                }
            }
        }
    }
}

/// Lazily enumerate every accepting path of `fst` for `input`.
///
/// Each result is computed on demand; dropping the iterator abandons the
/// rest of the search. Calling this again with the same arguments yields the
/// same sequence.
pub fn transduce<'a>(fst: &'a Fst, input: &str) -> Transductions<'a> {
    let mut config = fst.new_config();
    fst.prepare(&mut config, input);
    Transductions {
        fst,
        config,
        output: String::new(),
    }
}

/// Iterator returned by [`transduce`].
#[derive(Debug, Clone)]
pub struct Transductions<'a> {
    fst: &'a Fst,
    config: TraversalConfig,
    output: String,
}

impl Transductions<'_> {
    /// Traversal state, e.g. to inspect how much of the search has run.
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }
}

impl Iterator for Transductions<'_> {
    type Item = Transduction;

    fn next(&mut self) -> Option<Self::Item> {
        let weight = Transducer::next(self.fst, &mut self.config, &mut self.output)?;
        Some(Transduction {
            output: self.output.clone(),
            weight,
        })
    }
}

impl FusedIterator for Transductions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use crate::loader::load;

    const EXAMPLE: &str = "0 1 a x 0.5\n0 1 b y 1.5\n1 2 c z 2.5\n2 3.5\n";

    fn collect(fst: &Fst, input: &str) -> Vec<(String, f64)> {
        fst.transduce(input).map(|t| (t.output, t.weight)).collect()
    }

    #[test]
    fn example_scenarios() {
        let fst = load(EXAMPLE).unwrap();
        assert_eq!(collect(&fst, "ac"), [("xz".to_string(), 6.5)]);
        assert_eq!(collect(&fst, "bc"), [("yz".to_string(), 7.5)]);
        assert!(collect(&fst, "a").is_empty());
        assert!(collect(&fst, "").is_empty());
        assert!(collect(&fst, "acc").is_empty());
        assert!(collect(&fst, "q").is_empty());
    }

    #[test]
    fn empty_input_at_final_start() {
        let mut fst = Fst::new();
        fst.declare_state("0", true, 1.25);
        assert_eq!(collect(&fst, ""), [(String::new(), 1.25)]);
        assert!(collect(&fst, "a").is_empty());
    }

    #[test]
    fn empty_input_follows_epsilon_paths() {
        let mut fst = Fst::new();
        fst.add_state("0");
        fst.add_transition("0", Label::Epsilon, "e", "1", 0.5);
        fst.add_transition("0", "a", "x", "1", 0.5);
        fst.declare_state("1", true, 2.0);
        assert_eq!(collect(&fst, ""), [("e".to_string(), 2.5)]);
    }

    #[test]
    fn empty_automaton_yields_nothing() {
        let fst = Fst::new();
        assert!(collect(&fst, "").is_empty());
        assert!(collect(&fst, "abc").is_empty());
    }

    #[test]
    fn acceptance_then_consuming_then_epsilon() {
        // State 0 is final and has both consuming and epsilon transitions.
        let mut fst = Fst::new();
        fst.declare_state("0", true, 0.0);
        fst.add_transition("0", Label::Epsilon, "e1", "2", 1.0);
        fst.add_transition("0", "a", "x", "1", 1.0);
        fst.add_transition("0", Label::Epsilon, "e2", "3", 1.0);
        fst.add_transition("0", "a", "y", "1", 2.0);
        fst.declare_state("1", true, 0.0);
        fst.declare_state("2", true, 0.0);
        fst.declare_state("3", true, 0.0);
        fst.add_transition("2", "a", "p", "1", 0.0);
        fst.add_transition("3", "a", "q", "1", 0.0);

        assert_eq!(
            collect(&fst, "a"),
            [
                ("x".to_string(), 1.0),
                ("y".to_string(), 2.0),
                ("e1p".to_string(), 1.0),
                ("e2q".to_string(), 1.0),
            ]
        );
        assert_eq!(
            collect(&fst, ""),
            [
                (String::new(), 0.0),
                ("e1".to_string(), 1.0),
                ("e2".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn epsilon_chain_consumes_no_input() {
        let fst = load("0 1 0 a 1\n1 2 0 b 2\n2 3 c c 3\n3 4\n").unwrap();
        assert_eq!(collect(&fst, "c"), [("abc".to_string(), 10.0)]);
        assert!(collect(&fst, "").is_empty());
    }

    #[test]
    fn non_deterministic_fan_out() {
        let fst = load("0 1 a x 1\n0 2 a y 2\n0 1 a z 3\n1 0.5\n2\n").unwrap();
        assert_eq!(
            collect(&fst, "a"),
            [
                ("x".to_string(), 1.5),
                ("y".to_string(), 2.0),
                ("z".to_string(), 3.5),
            ]
        );
    }

    #[test]
    fn cycles_on_consuming_transitions_terminate() {
        let fst = load("0 0 a b 1\n0 1 c d 0\n1\n").unwrap();
        assert_eq!(collect(&fst, "aaac"), [("bbbd".to_string(), 3.0)]);
        assert_eq!(collect(&fst, "c"), [("d".to_string(), 0.0)]);
    }

    #[test]
    fn weights_are_summed() {
        let fst = load("0 1 a x 0.25\n1 2 b y 0.5\n2 3 c z 1.25\n3 2\n").unwrap();
        let results = collect(&fst, "abc");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].1, 0.25 + (0.5 + (1.25 + 2.0)));
    }

    #[test]
    fn multichar_symbol_never_matches() {
        let mut fst = Fst::new();
        fst.add_transition("0", "ab", "x", "1", 1.0);
        fst.declare_state("1", true, 0.0);
        assert!(collect(&fst, "ab").is_empty());
        assert!(collect(&fst, "a").is_empty());
    }

    #[test]
    fn unicode_input() {
        let fst = load("0 1 \u{00e4} a\n1 2 \u{00f6} o\n2\n").unwrap();
        assert_eq!(collect(&fst, "\u{00e4}\u{00f6}"), [("ao".to_string(), 2.0)]);
    }

    #[test]
    fn restartable() {
        let fst = load("0 1 a x 1\n0 2 a y 2\n1\n2\n").unwrap();
        assert_eq!(collect(&fst, "a"), collect(&fst, "a"));
    }

    #[test]
    fn lazy_first_result_skips_other_branches() {
        // The first branch accepts immediately; the second is a long chain.
        let mut source = String::from("0 1 a x\n1\n0 100 a y\n");
        for i in 100..200 {
            source.push_str(&format!("{} {} 0 e\n", i, i + 1));
        }
        source.push_str("200\n");
        let fst = load(&source).unwrap();

        let mut results = fst.transduce("a");
        let first = results.next().unwrap();
        assert_eq!(first.output, "x");
        let steps_after_first = results.config().steps();
        assert!(steps_after_first <= 2, "expanded {steps_after_first} frames");

        let rest: Vec<_> = results.collect();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].output, format!("y{}", "e".repeat(100)));
    }

    #[test]
    fn config_reuse_via_trait() {
        let fst = load(EXAMPLE).unwrap();
        let mut config = fst.new_config();
        let mut output = String::new();

        fst.prepare(&mut config, "ac");
        assert_eq!(Transducer::next(&fst, &mut config, &mut output), Some(6.5));
        assert_eq!(output, "xz");
        assert_eq!(Transducer::next(&fst, &mut config, &mut output), None);
        assert_eq!(config.stack_depth(), 0);

        fst.prepare(&mut config, "bc");
        assert_eq!(Transducer::next(&fst, &mut config, &mut output), Some(7.5));
        assert_eq!(output, "yz");
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let fst = load(EXAMPLE).unwrap();
        let mut results = fst.transduce("ac");
        assert!(results.next().is_some());
        assert!(results.next().is_none());
        assert!(results.next().is_none());
    }
}
