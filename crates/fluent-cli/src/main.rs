use clap::Parser;
use cli::{Args, Commands};
use commands::fetch::{resolve_status, FetchOptions};
use config::{config_path, Config};
use error::Result;
use logging::setup_logging;
use tracing::debug;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

fn handle_cli() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        utils::set_color(false);
    }

    let path = config_path(args.config.as_deref());
    let config = Config::load(&path)?;
    debug!(path = %path.display(), "loaded configuration");

    match args.command {
        Commands::Compare => {
            commands::compare::compare(&config)?;
        }
        Commands::Fetch {
            seed,
            ready_to_ship,
            status,
            with_customer,
        } => {
            let options = FetchOptions {
                ready_to_ship,
                status: resolve_status(&config, status)?,
                with_customer,
            };
            commands::fetch::fetch(&config, seed.as_deref(), &options)?;
        }
        Commands::Config => {
            commands::config::show(&path, &config)?;
        }
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
