//! Command-line interface definitions.
//!
//! Every flag is optional: running `assetwatch` with no arguments serves
//! `.` on port 8000 and keeps `Assets.mjs` in sync with `assets/`.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Serve an asset directory and keep its manifest module up to date
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (optional, default: assetwatch.toml)
    #[arg(short = 'C', long, global = true, default_value = "assetwatch.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Asset directory to scan (relative to the working directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Manifest module to write
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands (default: serve)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve files and regenerate the manifest on asset changes
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        args: ServeArgs,
    },

    /// Write the manifest once and exit
    #[command(visible_alias = "g")]
    Generate,
}

/// Serve command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long)]
    pub interface: Option<std::net::IpAddr>,

    /// Port number to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory exposed over HTTP
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub serve_root: Option<PathBuf>,

    /// Enable asset watching
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub watch: Option<bool>,

    /// Coalesce event bursts within this many milliseconds (0 = off)
    #[arg(short, long, value_name = "MS")]
    pub debounce: Option<u64>,
}

impl Cli {
    /// The command to run, defaulting to `serve` with no overrides.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            args: ServeArgs::default(),
        })
    }

    /// Serve arguments, if the command is `serve`.
    pub fn serve_args(&self) -> Option<ServeArgs> {
        match self.resolved_command() {
            Commands::Serve { args } => Some(args),
            Commands::Generate => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_defaults_to_serve() {
        let cli = Cli::try_parse_from(["assetwatch"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("assetwatch.toml"));

        let args = cli.serve_args().unwrap();
        assert!(args.port.is_none());
        assert!(args.watch.is_none());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "assetwatch", "serve", "--port", "9000", "--watch", "false", "-d", "50",
        ])
        .unwrap();

        let args = cli.serve_args().unwrap();
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.watch, Some(false));
        assert_eq!(args.debounce, Some(50));
    }

    #[test]
    fn test_global_paths_after_subcommand() {
        let cli =
            Cli::try_parse_from(["assetwatch", "generate", "--root", "media", "-m", "out.mjs"])
                .unwrap();

        assert!(matches!(cli.resolved_command(), Commands::Generate));
        assert!(cli.serve_args().is_none());
        assert_eq!(cli.root, Some(PathBuf::from("media")));
        assert_eq!(cli.manifest, Some(PathBuf::from("out.mjs")));
    }
}
