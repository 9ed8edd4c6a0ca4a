//! Command-line front end
//!
//! ```text
//! pixfilt <input> <output|-i> <filter> [name value ...]
//! ```
//!
//! The input is decoded (PNG or JPEG), the named filter is looked up in the
//! [`Registry`], its options are parsed from the trailing tokens and the
//! result is written as PNG. `-i` in place of the output overwrites the
//! input file.
//!
//! Every failure maps to a distinct process exit code, see
//! [`CliError::exit_code`].

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use pixfilt_filter::{FilterError, Registry};
use pixfilt_io::IoError;
use thiserror::Error;
use tracing::{debug, info};

/// Output argument that means "overwrite the input".
pub const IN_PLACE: &str = "-i";

const USAGE_LINE: &str = "Usage: pixfilt [--quiet] <input> <output|-i> <filter> [name value ...]";

/// Parsed command line.
#[derive(Parser, Debug)]
#[command(name = "pixfilt")]
#[command(version, about = "Apply an image filter to a PNG or JPEG file", long_about = None)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Input image (PNG or JPEG)
    pub input: PathBuf,

    /// Output PNG path, or -i to overwrite the input
    #[arg(allow_hyphen_values = true)]
    pub output: String,

    /// Filter name
    pub filter: String,

    /// Filter options as alternating name and value tokens
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub options: Vec<String>,
}

impl Cli {
    /// Destination path, resolving `-i` to the input path.
    pub fn output_path(&self) -> PathBuf {
        if self.output == IN_PLACE {
            self.input.clone()
        } else {
            PathBuf::from(&self.output)
        }
    }
}

/// Errors that end a CLI run
#[derive(Debug, Error)]
pub enum CliError {
    /// Required arguments missing or malformed
    #[error("{0}")]
    Usage(String),

    /// No filter registered under the requested name
    #[error(transparent)]
    UnknownFilter(FilterError),

    /// Filter options could not be parsed
    #[error(transparent)]
    Options(FilterError),

    /// Input file could not be read
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// Input file is not a decodable image
    #[error("failed to decode '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// Filter failed while running
    #[error("filter failed: {0}")]
    Apply(#[source] FilterError),

    /// Output could not be encoded or written
    #[error("failed to write '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// | code | meaning                     |
    /// |------|-----------------------------|
    /// | 1    | missing or bad arguments    |
    /// | 2    | unknown filter              |
    /// | 3    | option parse failure        |
    /// | 4    | input read failure          |
    /// | 5    | input decode failure        |
    /// | 6    | filter apply failure        |
    /// | 7    | output encode/write failure |
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) => 1,
            CliError::UnknownFilter(_) => 2,
            CliError::Options(_) => 3,
            CliError::Read { .. } => 4,
            CliError::Decode { .. } => 5,
            CliError::Apply(_) => 6,
            CliError::Encode { .. } => 7,
        }
    }
}

/// Usage text listing every registered filter with its options and defaults.
pub fn usage(registry: &Registry) -> String {
    let mut text = String::from(USAGE_LINE);
    text.push_str("\n\nFilters:\n");
    for kind in registry.iter() {
        let _ = writeln!(text, "  {:<10} {}", kind.name(), kind.description());
        for line in kind.option_usage() {
            let _ = writeln!(text, "      {}", line);
        }
    }
    text
}

/// Parse command-line arguments.
///
/// # Errors
///
/// Returns the clap error unchanged so the caller can tell help and version
/// requests apart from real usage errors.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Run one filter invocation described by `cli`.
///
/// Returns the path the result was written to.
pub fn run(cli: &Cli, registry: &Registry) -> Result<PathBuf, CliError> {
    let kind = registry
        .lookup(&cli.filter)
        .map_err(CliError::UnknownFilter)?;
    let config = kind.parse(&cli.options).map_err(CliError::Options)?;
    let output = cli.output_path();

    let source = load(&cli.input)?;
    info!(
        filter = %kind,
        input = %cli.input.display(),
        size = %source.size(),
        "loaded input"
    );

    let start = Instant::now();
    let result = config.run(&source).map_err(CliError::Apply)?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "filter finished");

    pixfilt_io::write_image(&result, &output).map_err(|source| CliError::Encode {
        path: output.clone(),
        source,
    })?;
    info!(output = %output.display(), size = %result.size(), "wrote output");

    Ok(output)
}

fn load(path: &Path) -> Result<pixfilt_core::Image, CliError> {
    let data = pixfilt_io::read_file(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    pixfilt_io::decode_image(&data).map_err(|source| CliError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilt_core::{Image, Pixel};

    fn cli(args: &[&str]) -> Cli {
        parse_args(std::iter::once("pixfilt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_positionals_and_options() {
        let c = cli(&["in.png", "out.png", "median", "radius", "3", "percent", "-5"]);
        assert_eq!(c.input, PathBuf::from("in.png"));
        assert_eq!(c.output, "out.png");
        assert_eq!(c.filter, "median");
        assert_eq!(c.options, vec!["radius", "3", "percent", "-5"]);
        assert!(!c.quiet);
        assert_eq!(c.output_path(), PathBuf::from("out.png"));
    }

    #[test]
    fn test_parse_in_place() {
        let c = cli(&["--quiet", "photo.png", "-i", "kuwahara"]);
        assert!(c.quiet);
        assert!(c.options.is_empty());
        assert_eq!(c.output_path(), PathBuf::from("photo.png"));
    }

    #[test]
    fn test_missing_arguments() {
        assert!(parse_args(["pixfilt"]).is_err());
        assert!(parse_args(["pixfilt", "in.png", "out.png"]).is_err());
    }

    #[test]
    fn test_usage_lists_filters_and_options() {
        let text = usage(&Registry::builtin());
        for name in ["dilate", "median", "bilateral", "kuwahara", "skidmark"] {
            assert!(text.contains(name), "{name} missing from usage");
        }
        assert!(text.contains("threshold <int> (default 128)"));
        assert!(text.contains("scale <float> (default 1.0)"));
        assert!(text.contains("blend <average|sum> (default average)"));
    }

    #[test]
    fn test_exit_codes_for_lookup_and_options() {
        let registry = Registry::builtin();

        let err = run(&cli(&["in.png", "out.png", "blur"]), &registry).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "filter 'blur' not found");

        let err = run(&cli(&["in.png", "out.png", "dilate", "radius"]), &registry).unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let err = run(&cli(&["in.png", "out.png", "dilate", "size", "3"]), &registry).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_codes_for_files() {
        let registry = Registry::builtin();

        let missing = "/nonexistent/pixfilt/input.png";
        let err = run(&cli(&[missing, "out.png", "median"]), &registry).unwrap_err();
        assert_eq!(err.exit_code(), 4);

        let garbage = pixfilt_test::scratch_path("cli_garbage.png").unwrap();
        std::fs::write(&garbage, b"this is not an image").unwrap();
        let err = run(&cli(&[garbage.as_str(), "out.png", "median"]), &registry).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        let _ = std::fs::remove_file(&garbage);
    }

    #[test]
    fn test_run_writes_png() {
        let registry = Registry::builtin();
        let input = pixfilt_test::scratch_path("cli_unit_in.png").unwrap();
        let output = pixfilt_test::scratch_path("cli_unit_out.png").unwrap();

        let image = pixfilt_test::fixtures::single_opaque(4, 4, 1, 1, Pixel::rgb(40, 50, 60));
        pixfilt_io::write_image(&image, &input).unwrap();

        let written = run(&cli(&[input.as_str(), output.as_str(), "dilate"]), &registry).unwrap();
        assert_eq!(written, PathBuf::from(&output));
        let result: Image = pixfilt_io::read_image(&output).unwrap();
        assert!(result.pixels().iter().all(|&p| p == Pixel::rgb(40, 50, 60)));

        let _ = std::fs::remove_file(&input);
        let _ = std::fs::remove_file(&output);
    }

    #[test]
    fn test_encode_failure() {
        let registry = Registry::builtin();
        let input = pixfilt_test::scratch_path("cli_unit_enc.png").unwrap();
        pixfilt_io::write_image(&pixfilt_test::fixtures::gradient(3, 3), &input).unwrap();

        let err = run(
            &cli(&[input.as_str(), "/nonexistent/pixfilt/out.png", "median", "radius", "1"]),
            &registry,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 7);

        let _ = std::fs::remove_file(&input);
    }
}
