// Opt-in epsilon-cycle detection.
//
// Transduction never calls this; it is for callers that want to reject
// automata violating the epsilon-acyclic precondition before searching them.

use crate::WfstError;
use crate::automaton::Fst;
use crate::state::StateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl Fst {
    /// Find a cycle made only of epsilon transitions.
    ///
    /// Returns the states of one such cycle in traversal order, starting and
    /// ending implicitly at the first element, or `None` if the epsilon
    /// subgraph is acyclic.
    pub fn find_epsilon_cycle(&self) -> Option<Vec<StateId>> {
        let mut marks = vec![Mark::Unvisited; self.len()];
        // (state, next transition index to examine)
        let mut stack: Vec<(StateId, usize)> = Vec::new();

        for (root, _) in self.states() {
            if marks[root.index()] != Mark::Unvisited {
                continue;
            }
            marks[root.index()] = Mark::OnStack;
            stack.push((root, 0));

            while let Some(&(state, next)) = stack.last() {
                let transitions = self.state(state).transitions();
                let edge = transitions[next..]
                    .iter()
                    .position(|t| t.input.is_epsilon())
                    .map(|offset| next + offset);

                let Some(index) = edge else {
                    marks[state.index()] = Mark::Done;
                    stack.pop();
                    continue;
                };
                let top = stack.len() - 1;
                stack[top].1 = index + 1;

                let target = transitions[index].target;
                match marks[target.index()] {
                    Mark::Unvisited => {
                        marks[target.index()] = Mark::OnStack;
                        stack.push((target, 0));
                    }
                    Mark::OnStack => {
                        let start = stack.iter().position(|&(s, _)| s == target).unwrap_or(0);
                        return Some(stack[start..].iter().map(|&(s, _)| s).collect());
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }

    /// Fail with [`WfstError::EpsilonCycle`] if the epsilon subgraph has a cycle.
    pub fn check_epsilon_acyclic(&self) -> Result<(), WfstError> {
        match self.find_epsilon_cycle() {
            None => Ok(()),
            Some(cycle) => Err(WfstError::EpsilonCycle {
                states: cycle
                    .into_iter()
                    .map(|id| self.state(id).name().to_string())
                    .collect(),
            }),
        }
    }
}
