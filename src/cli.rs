use clap::Parser;
use std::path::PathBuf;

/// Output target meaning "write to stdout"
const STDOUT_TARGET: &str = "-";

/// Generate draw.io architecture diagrams for VSM products and publish them to EAM
#[derive(Parser, Debug)]
#[command(name = "vsm-diagram")]
#[command(version)]
#[command(
    about = "Generate draw.io architecture diagrams for VSM products and publish them to EAM",
    long_about = None
)]
pub struct Args {
    /// Path to the configuration file (defaults to ./vsm-diagram.config.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Product to diagram (overrides `product_name` from the config file)
    #[arg(short, long, value_name = "NAME")]
    pub product_name: Option<String>,

    /// Generate the diagram without publishing or modifying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Read a saved GraphQL response instead of calling the VSM API (implies --dry-run)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Also write the generated draw.io XML to this file ("-" for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Where the generated document goes once the run is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// True when nothing may be published
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.input.is_some()
    }

    /// Resolves `--output`; a dry run without `--output` prints to stdout
    pub fn output_target(&self) -> Option<OutputTarget> {
        match self.output.as_deref() {
            Some(STDOUT_TARGET) => Some(OutputTarget::Stdout),
            Some(path) => Some(OutputTarget::File(PathBuf::from(path))),
            None if self.is_dry_run() => Some(OutputTarget::Stdout),
            None => None,
        }
    }
}
