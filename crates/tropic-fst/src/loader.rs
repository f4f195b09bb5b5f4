// Line-oriented text grammar loader.
//
//   # comment
//   <from> <to> <input> <output> [<weight>]     transition, weight defaults to 1
//   <state> [<weight>]                          final state, weight defaults to 0
//
// States are unsigned integers, symbols are word tokens (alphanumerics or
// `_`), weights are unsigned decimals (`12` or `12.5`). Digits in states and
// weights are ASCII only; other Unicode decimal digits are rejected.

use std::path::Path;

use crate::automaton::Fst;
use crate::label::{DEFAULT_EPSILON_MARKER, Label};
use crate::observer::{FstBuilder, LoadEvent, NoopObserver, Observer};
use crate::{ParseError, WfstError};

const DEFAULT_TRANSITION_WEIGHT: f64 = 1.0;
const DEFAULT_FINAL_WEIGHT: f64 = 0.0;

/// Loader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Input token that denotes an epsilon transition. `None` makes every
    /// input token a concrete symbol.
    pub epsilon_marker: Option<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            epsilon_marker: Some(DEFAULT_EPSILON_MARKER.to_string()),
        }
    }
}

/// One successfully parsed definition line.
#[derive(Debug, Clone, PartialEq)]
enum Line<'a> {
    Transition {
        from: &'a str,
        to: &'a str,
        input: &'a str,
        output: &'a str,
        weight: f64,
    },
    Final { state: &'a str, weight: f64 },
}

/// Text grammar loader.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: LoadOptions,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Parse `source` into a new automaton.
    pub fn load(&self, source: &str) -> Result<Fst, ParseError> {
        self.load_with_observer(source, NoopObserver)
    }

    /// Parse `source` into a new automaton, reporting events to `observer`.
    pub fn load_with_observer<O: Observer>(&self, source: &str, observer: O) -> Result<Fst, ParseError> {
        let mut builder = FstBuilder::with_observer(observer);
        self.load_into(&mut builder, source)?;
        Ok(builder.finish())
    }

    /// Read and parse a UTF-8 definition file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Fst, WfstError> {
        self.load_file_with_observer(path, NoopObserver)
    }

    /// Read and parse a UTF-8 definition file, reporting events to `observer`.
    pub fn load_file_with_observer<O: Observer>(
        &self,
        path: impl AsRef<Path>,
        observer: O,
    ) -> Result<Fst, WfstError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| WfstError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.load_with_observer(&source, observer)?)
    }

    /// Apply the lines of `source` to `builder` in order.
    ///
    /// Stops at the first line matching neither grammar shape. That line
    /// contributes nothing, but lines before it have already been applied.
    pub fn load_into<O: Observer>(&self, builder: &mut FstBuilder<O>, source: &str) -> Result<(), ParseError> {
        let epsilon_marker = self.options.epsilon_marker.as_deref();

        for (index, raw) in source.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                builder.observer_mut().on_load(&LoadEvent::Skipped { line_number });
                continue;
            }

            match parse_line(line) {
                Some(Line::Transition {
                    from,
                    to,
                    input,
                    output,
                    weight,
                }) => {
                    let input = Label::from_token(input, epsilon_marker);
                    builder.observer_mut().on_load(&LoadEvent::TransitionLine {
                        line_number,
                        from,
                        to,
                        input: &input,
                        output,
                        weight,
                    });
                    builder.add_transition(from, input, output, to, weight);
                }
                Some(Line::Final { state, weight }) => {
                    builder.observer_mut().on_load(&LoadEvent::FinalStateLine {
                        line_number,
                        state,
                        weight,
                    });
                    builder.declare_state(state, true, weight);
                }
                None => {
                    return Err(ParseError {
                        line_number,
                        line: raw.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Parse `source` with the default options.
pub fn load(source: &str) -> Result<Fst, ParseError> {
    Loader::new().load(source)
}

/// Read and parse a definition file with the default options.
pub fn load_file(path: impl AsRef<Path>) -> Result<Fst, WfstError> {
    Loader::new().load_file(path)
}

/// Match a trimmed, non-comment line against the two grammar shapes.
fn parse_line(line: &str) -> Option<Line<'_>> {
    let mut fields: [&str; 5] = [""; 5];
    let mut count = 0;
    for token in line.split_whitespace() {
        if count == fields.len() {
            return None;
        }
        fields[count] = token;
        count += 1;
    }

    match count {
        1 | 2 => {
            let state = fields[0];
            if !is_state(state) {
                return None;
            }
            let weight = optional_weight(&fields[1..count], DEFAULT_FINAL_WEIGHT)?;
            Some(Line::Final { state, weight })
        }
        4 | 5 => {
            let [from, to, input, output, _] = fields;
            if !(is_state(from) && is_state(to) && is_symbol(input) && is_symbol(output)) {
                return None;
            }
            let weight = optional_weight(&fields[4..count], DEFAULT_TRANSITION_WEIGHT)?;
            Some(Line::Transition {
                from,
                to,
                input,
                output,
                weight,
            })
        }
        _ => None,
    }
}

fn is_state(token: &str) -> bool {
    is_digits(token)
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_symbol(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// `None` if a weight token is present but malformed.
fn optional_weight(tokens: &[&str], default: f64) -> Option<f64> {
    match tokens {
        [] => Some(default),
        [token] => parse_weight(token),
        _ => None,
    }
}

fn parse_weight(token: &str) -> Option<f64> {
    let (integer, fraction) = match token.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (token, None),
    };
    if !is_digits(integer) || fraction.is_some_and(|f| !is_digits(f)) {
        return None;
    }
    token.parse().ok()
}
