use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare the fluent order query with its hand-chained equivalent
    #[clap(name = "compare", visible_alias = "cmp")]
    Compare,

    /// Run an order query against seeded in-memory data
    Fetch {
        /// JSON file of orders to seed the engine with
        #[arg(required = false, short, long, value_hint = ValueHint::FilePath)]
        seed: Option<PathBuf>,

        /// Only orders that are submitted and paid for
        #[arg(required = false, short, long)]
        ready_to_ship: bool,

        /// Only orders with this status
        /// Without a value the configured default status is used
        #[arg(required = false, long, num_args = 0..=1)]
        status: Option<Option<String>>,

        /// Include customers with their addresses
        #[arg(required = false, long)]
        with_customer: bool,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_status_without_value() {
        let args = Args::try_parse_from(["fluent", "fetch", "--status"]).unwrap();

        assert!(matches!(
            args.command,
            Commands::Fetch {
                status: Some(None),
                ..
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["fluent", "compare", "-vv", "--json"]).unwrap();

        assert_eq!(args.verbose, 2);
        assert!(args.json);
        assert!(matches!(args.command, Commands::Compare));
    }
}
