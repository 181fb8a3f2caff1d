mod app;
mod cli;
mod contact_form;
mod content;
mod logging;
mod page;

use clap::Parser;
use color_eyre::eyre::eyre;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use folio_config::Config;

use crate::app::App;
use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref())?;

    let config_path = cli.config_path();
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    cli.apply(&mut config);

    if cli.write_config {
        let path = config_path.ok_or_else(|| eyre!("no config directory on this platform"))?;
        config.save(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mouse = config.ui.mouse;
    let app = App::new(&config, cli.route.clone(), cli.seed);

    let terminal = ratatui::init();
    if mouse {
        crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    }
    let result = app.run(terminal);
    if mouse {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
    result
}
