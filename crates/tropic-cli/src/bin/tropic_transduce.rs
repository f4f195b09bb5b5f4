// tropic-transduce: Run words through a weighted transducer definition.
//
// Loads a definition file and prints every transduction of each word as
// `word<TAB>output<TAB>weight`. Words come from the command line or, if none
// are given, from stdin (one per line).
//
// Usage:
//   tropic-transduce [OPTIONS] DEFINITION [WORD...]

use std::io::{self, BufRead, Write};

const HELP: &str = "\
tropic-transduce: Run words through a weighted transducer definition.

Usage: tropic-transduce [OPTIONS] DEFINITION [WORD...]

If WORD arguments are given, transduces each word.
Otherwise reads words from stdin (one per line).

Options:
  -e, --epsilon MARKER   Input token denoting epsilon (default: 0)
      --no-epsilon       Treat every input token as a concrete symbol
  -n, --limit N          Print at most N results per word
      --check-cycles     Reject definitions containing epsilon cycles
  -v, --verbose          Increase log verbosity (repeatable; RUST_LOG overrides)
  -h, --help             Print this help";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if tropic_cli::wants_help(&args) {
        println!("{HELP}");
        return;
    }

    let options = tropic_cli::parse_args(&args).unwrap_or_else(|e| tropic_cli::fatal(&e));
    tropic_cli::init_logging(options.verbosity);

    let fst = tropic_cli::load_definition(&options)
        .unwrap_or_else(|e| tropic_cli::fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let run = |word: &str, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        if let Err(e) = tropic_cli::write_transductions(out, &fst, word, options.limit) {
            tropic_cli::fatal(&format!("failed to write output: {e}"));
        }
    };

    if options.words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            run(word, &mut out);
        }
    } else {
        for word in &options.words {
            run(word, &mut out);
        }
    }

    if let Err(e) = out.flush() {
        tropic_cli::fatal(&format!("failed to write output: {e}"));
    }
}
