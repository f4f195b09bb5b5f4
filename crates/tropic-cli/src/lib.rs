// tropic-cli: shared utilities for the command-line driver.

use std::io::Write;
use std::process;

use log::LevelFilter;
use tropic_fst::{Fst, LoadOptions, Loader, LogObserver, WfstError};

/// Options for `tropic-transduce`.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub definition: String,
    pub words: Vec<String>,
    pub epsilon_marker: Option<String>,
    /// Maximum number of results printed per word.
    pub limit: Option<usize>,
    /// Reject definitions with epsilon cycles before transducing.
    pub check_cycles: bool,
    /// Number of `-v` flags.
    pub verbosity: u8,
}

/// Parse command-line arguments (without the program name).
///
/// The first positional argument is the definition file; the rest are words.
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut definition = None;
    let mut words = Vec::new();
    let mut epsilon_marker = Some(tropic_fst::label::DEFAULT_EPSILON_MARKER.to_string());
    let mut limit = None;
    let mut check_cycles = false;
    let mut verbosity = 0u8;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--epsilon=") {
            epsilon_marker = Some(val.to_string());
        } else if arg == "--epsilon" || arg == "-e" {
            epsilon_marker = Some(required_value(arg, iter.next())?.to_string());
        } else if arg == "--no-epsilon" {
            epsilon_marker = None;
        } else if let Some(val) = arg.strip_prefix("--limit=") {
            limit = Some(parse_limit(val)?);
        } else if arg == "--limit" || arg == "-n" {
            limit = Some(parse_limit(required_value(arg, iter.next())?)?);
        } else if arg == "--check-cycles" {
            check_cycles = true;
        } else if arg.len() > 1 && arg.starts_with('-') && arg[1..].bytes().all(|b| b == b'v') {
            verbosity = verbosity.saturating_add((arg.len() - 1) as u8);
        } else if arg == "--verbose" {
            verbosity = verbosity.saturating_add(1);
        } else if arg.starts_with('-') && arg != "-" {
            return Err(format!("unknown option {arg}"));
        } else if definition.is_none() {
            definition = Some(arg.clone());
        } else {
            words.push(arg.clone());
        }
    }

    let definition = definition.ok_or_else(|| "missing DEFINITION file".to_string())?;
    Ok(CliOptions {
        definition,
        words,
        epsilon_marker,
        limit,
        check_cycles,
        verbosity,
    })
}

fn required_value<'a>(option: &str, value: Option<&'a String>) -> Result<&'a str, String> {
    value
        .map(String::as_str)
        .ok_or_else(|| format!("{option} requires a value"))
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("invalid limit {value:?}"))
}

/// Map `-v` count to a log level. `RUST_LOG` overrides it.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Load the definition file named in `options`, logging construction events.
pub fn load_definition(options: &CliOptions) -> Result<Fst, WfstError> {
    let loader = Loader::with_options(LoadOptions {
        epsilon_marker: options.epsilon_marker.clone(),
    });
    log::info!("loading FST from {}", options.definition);
    let fst = loader.load_file_with_observer(&options.definition, LogObserver)?;
    log::info!(
        "loaded {} states, {} transitions",
        fst.len(),
        fst.transition_count()
    );
    if options.check_cycles {
        fst.check_epsilon_acyclic()?;
    }
    Ok(fst)
}

/// Write every transduction of `word` as `word<TAB>output<TAB>weight`.
pub fn write_transductions(
    out: &mut impl Write,
    fst: &Fst,
    word: &str,
    limit: Option<usize>,
) -> std::io::Result<usize> {
    let mut count = 0;
    for result in fst.transduce(word).take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "{word}\t{}\t{}", result.output, result.weight)?;
        count += 1;
    }
    if count == 0 {
        writeln!(out, "{word}\t(no transduction)")?;
    }
    Ok(count)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
