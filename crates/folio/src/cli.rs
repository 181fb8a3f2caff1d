use std::path::PathBuf;

use clap::Parser;
use folio_config::Config;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "A personal portfolio that lives in your terminal")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Turn off animation, as if the system preferred reduced motion.
    #[arg(long, default_value_t = false)]
    pub reduced_motion: bool,

    /// Disable the floating snippet background.
    #[arg(long, default_value_t = false)]
    pub no_effects: bool,

    /// Route the page is opened at, e.g. `/projects` or `/#contact`.
    #[arg(long, value_name = "ROUTE", default_value = "/")]
    pub route: String,

    /// Write logs here instead of the platform data directory.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long, default_value_t = false)]
    pub write_config: bool,

    /// Seed for the snippet effect, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Where the configuration is read from and written to.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_path)
    }

    /// Fold command-line switches into the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if self.reduced_motion {
            config.effects.reduced_motion = true;
        }
        if self.no_effects {
            config.effects.enabled = false;
        }
    }
}
