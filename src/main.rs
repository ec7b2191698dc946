use crate::{
    config::{Config, ConfigLoader},
    hero::{Hero, HeroView, title_lines},
    logging::LogConfig,
    theme::{Theme, ThemeStore},
    typewriter::Typewriter,
};
use anyhow::Context;
use clap::Parser;
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};
use tokio::runtime::{Builder, Runtime};

mod config;
mod hero;
mod logging;
mod theme;
mod typewriter;

/// Run the gh-templates landing hero in your terminal.
#[derive(Parser, Debug)]
#[command(author, version, about = "The gh-templates landing hero, typed out in your terminal", long_about = None)]
struct Cli {
    /// The path to the configuration file.
    #[arg(short, long, env = "GH_TEMPLATES_HERO_CONFIG")]
    config: Option<PathBuf>,

    /// Start with this theme instead of the remembered one.
    #[arg(short, long)]
    theme: Option<Theme>,

    /// Print a single updating line instead of taking over the screen.
    #[arg(long)]
    plain: bool,

    /// Stop after this many commands have been typed and cleared.
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Render the title as plain text instead of a FIGlet banner.
    #[arg(long)]
    no_banner: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info", env = "GH_TEMPLATES_HERO_LOG_LEVEL")]
    log_level: String,

    /// Write logs to this file.
    #[arg(long, env = "GH_TEMPLATES_HERO_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn build_runtime() -> io::Result<Runtime> {
    Builder::new_multi_thread().worker_threads(1).thread_name("hero-timer").enable_all().build()
}

fn run(cli: Cli, config: Config, plain: bool, tty: bool) -> anyhow::Result<()> {
    let store = ThemeStore::in_data_dir();
    let theme = theme::resolve(cli.theme, config.theme, store.as_ref());
    let view = HeroView::new(
        title_lines(&config.title, config.banner && !cli.no_banner),
        config.subtitle.clone(),
        config.prompt.clone(),
        config.cursor(),
    );
    let mut hero = Hero::new(view, theme, store, cli.count);

    let runtime = build_runtime().context("building runtime")?;
    let machine = Typewriter::new(config.command_list(), config.timings());
    let (mut timer, frames) = typewriter::spawn(runtime.handle(), machine);
    tracing::info!(%theme, plain, tty, animating = timer.is_active(), "hero started");

    let result = if plain {
        runtime.block_on(hero.run_plain(&mut io::stdout(), frames, tty))
    } else {
        hero.run_interactive(frames)
    };
    timer.dispose();
    result.context("drawing hero")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let tty = io::stdout().is_terminal();
    let plain = cli.plain || !tty;
    logging::init(LogConfig::new(cli.log_level.clone(), cli.log_file.clone(), plain)).context("setting up logging")?;

    let config = ConfigLoader::new(cli.config.clone()).load().context("loading configuration")?;
    run(cli, config, plain, tty)
}
