use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use spargat::core::{config::Config, http::ReqwestClient};
use spargat::{commands, utils::term};

#[derive(Parser, Debug)]
#[clap(name = "spargat")]
#[clap(about = "Download the Spargat map index together with every map archive and icon")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to a TOML config file (default: ./spargat.toml, then the user config dir)
    #[clap(long)]
    config: Option<PathBuf>,

    /// URL of the remote map index
    #[clap(long, env = "SPARGAT_INDEX_URL")]
    index_url: Option<String>,

    /// Directory that receives the downloads, the cached index and the manifest
    #[clap(short, long)]
    output_dir: Option<PathBuf>,

    /// Always fetch the index instead of reusing a local copy, and do not save it
    #[clap(long)]
    no_cache: bool,

    /// Do not write the list of downloaded files
    #[clap(long)]
    no_manifest: bool,

    /// Hide per-file progress bars
    #[clap(long)]
    no_progress: bool,

    /// Disable colored output
    #[clap(long)]
    no_color: bool,

    /// Request timeout in seconds (default: wait indefinitely)
    #[clap(long)]
    timeout: Option<u64>,

    /// Show debug logging
    #[clap(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> spargat::error::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(url) = self.index_url {
            config.index_url = url;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if self.no_cache {
            config.cache_index = false;
        }
        if self.no_manifest {
            config.write_manifest = false;
        }
        if self.no_progress {
            config.progress = false;
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    term::init_colors(!cli.no_color && console::colors_enabled());
    term::print_banner();

    let result = cli
        .into_config()
        .and_then(|config| {
            let client = ReqwestClient::new(config.timeout())?;
            commands::fetch::run(&config, &client)
        })
        .map_err(|e| anyhow::anyhow!(e));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
