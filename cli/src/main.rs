use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use kubepizza_cli::{SUGGEST_DIRECTIVE, Settings, build_tree, split_suggest_args};
use kubepizza_core::{ActionError, CancelToken, Outcome};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status after Ctrl-C.
const EXIT_CANCELLED: u8 = 130;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<u8, String> {
    let settings = Settings::from_env()?;
    init_tracing(&settings.log_level);

    let catalog = Arc::new(settings.load_catalog()?);
    let tree = build_tree(catalog, &settings).map_err(|err| format!("invalid command tree: {err}"))?;

    if let Some((first, rest)) = args.split_first() {
        if first == SUGGEST_DIRECTIVE {
            return suggest(&tree, rest);
        }
    }

    let cancel = CancelToken::new();
    let handle = cancel.clone();
    ctrlc::set_handler(move || handle.cancel())
        .map_err(|err| format!("Failed to install Ctrl-C handler: {err}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = tree.run(args, &cancel, &mut out);
    out.flush().map_err(|err| format!("Failed to write output: {err}"))?;

    match outcome {
        Ok(outcome) if outcome.is_success() => {
            debug!(?outcome, "finished");
            Ok(0)
        }
        Ok(outcome) => {
            if let Outcome::Rejected(errors) = &outcome {
                for err in errors {
                    eprintln!("error: {err}");
                }
            }
            eprintln!("Run '{} --help' for usage.", tree.name());
            Ok(1)
        }
        Err(ActionError::Cancelled) => {
            eprintln!("cancelled");
            Ok(EXIT_CANCELLED)
        }
        Err(err) => Err(err.to_string()),
    }
}

fn suggest(tree: &kubepizza_core::CommandTree, words: &[String]) -> Result<u8, String> {
    let (done, partial) = split_suggest_args(words);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for candidate in tree.complete(done, partial) {
        writeln!(out, "{candidate}").map_err(|err| format!("Failed to write output: {err}"))?;
    }
    Ok(0)
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
