use std::process::ExitCode;

use clap::error::ErrorKind;
use pixfilt::cli::{self, CliError};
use pixfilt::filter::Registry;
use tracing_subscriber::EnvFilter;

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn fail(err: &CliError) -> ExitCode {
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    let registry = Registry::builtin();

    let args = match cli::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                if err.kind() == ErrorKind::DisplayHelp {
                    println!("\n{}", cli::usage(&registry));
                }
                return ExitCode::SUCCESS;
            }
            _ => {
                eprint!("{}", cli::usage(&registry));
                eprintln!();
                let message = err.to_string();
                let message = message.trim_start_matches("error: ").trim_end();
                return fail(&CliError::Usage(message.to_string()));
            }
        },
    };

    init_logging(args.quiet);

    match cli::run(&args, &registry) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}
