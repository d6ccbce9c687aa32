use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use spacetraveling::generator::generate_site;
use spacetraveling::logger::configure_logger;
use spacetraveling::prismic::get_prismic_client;
use spacetraveling::server::server_run;
use spacetraveling::view::templates::Templates;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "spacetraveling.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serves the blog, fetching posts on every request (default)
    Serve,
    /// Writes the home page and the pre-rendered posts as static files
    Generate {
        /// Output directory. Defaults to paths.output_dir, then ./out
        #[arg(short, long)]
        out_dir: Option<String>,
    },
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run spacetraveling --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting spaceTraveling =-=-=-=-=-=-=-=-=-=-=-=-=-");
            info!("Listening on {}:{}", config.server.address, config.server.port);
            server_run(config).await?;
        }
        Command::Generate { out_dir } => {
            let out_dir = out_dir.map(PathBuf::from)
                .or_else(|| config.paths.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("out"));
            let templates = Templates::load(config.paths.template_dir.as_deref())?;
            let client = get_prismic_client(&config, None)?;
            let report = generate_site(&client, &config, &templates, &out_dir).await
                .with_context(|| format!("Error generating site in {}", out_dir.display()))?;
            info!("Done: {} pages written", report.pages.len());
        }
    }

    Ok(())
}
