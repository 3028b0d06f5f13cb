// jack-analyzer: Jack syntax analyzer producing XML parse trees

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jack_analyzer::driver::{analyze_path, AnalyzerOptions, OutputMode};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A .jack file, or a directory whose .jack files are all analyzed
    path: PathBuf,

    /// Directory for the generated .xml files (default: beside each source)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Write the flat token stream (<Name>T.xml) instead of the parse tree
    #[arg(long)]
    tokens: bool,

    /// Spaces of indentation per nesting level
    #[arg(long, default_value_t = 0)]
    indent: usize,
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings and errors).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let options = AnalyzerOptions {
        mode: if args.tokens {
            OutputMode::Tokens
        } else {
            OutputMode::Tree
        },
        indent: args.indent,
        out_dir: args.out_dir,
    };

    match analyze_path(&args.path, &options) {
        Ok(report) if report.is_success() => {
            eprintln!("Analyzed {} file(s).", report.written.len());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            eprintln!(
                "Analyzed {} file(s), {} failed.",
                report.written.len(),
                report.failures.len()
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
