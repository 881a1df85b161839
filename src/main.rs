use anyhow::Context;
use clap::Parser;
use nameheart::audio;
use nameheart::render::{TerminalDrawer, TerminalGuard, WindowSize};
use nameheart::{Config, Driver, Session, TerminalEvents, ThemeName};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Types a name into a pulsing heart.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The configuration file to use.
    #[arg(short, long, env = "NAMEHEART_CONFIG")]
    config: Option<PathBuf>,

    /// The built in theme to start from when there's no configuration file.
    #[arg(short, long, value_enum)]
    theme: Option<ThemeName>,

    /// Skip the welcome screen and type this name right away.
    #[arg(short, long)]
    name: Option<String>,

    /// The number of frames per second to render.
    #[arg(long)]
    fps: Option<u32>,

    /// The seed for the background field.
    #[arg(long)]
    seed: Option<u64>,

    /// An audio file to play in the background.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the configuration that would be used and exit.
    #[arg(long)]
    print_config: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match (&cli.config, cli.theme) {
        (Some(path), _) => Config::load(path)?,
        (None, Some(theme)) => Config::for_theme(theme),
        (None, None) => match Config::default_path().filter(|path| path.exists()) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        },
    };
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.audio.is_some() {
        config.audio.path = cli.audio.clone();
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("initializing logging: {e}"))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let config = load_config(&cli)?;
    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let window = WindowSize::current().context("reading terminal size")?;
    let soundtrack = audio::soundtrack(&config.audio);
    let fps = config.fps;
    let mut session = Session::new(config, window, soundtrack);
    if let Some(name) = &cli.name {
        session.enter();
        session.start(name);
    }
    info!(rows = window.rows, columns = window.columns, fps, "starting");

    let _guard = TerminalGuard::acquire().context("setting up terminal")?;
    let mut drawer = TerminalDrawer::new(io::stdout(), window);
    let mut driver = Driver::new(session, fps);
    driver.run(&mut drawer, &mut TerminalEvents).context("rendering")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_theme() {
        let cli = Cli::parse_from(["nameheart", "--theme", "midnight", "--fps", "30", "--seed", "4"]);
        let config = load_config(&cli).expect("invalid config");
        assert_eq!(config.fps, 30);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.field.count, Config::for_theme(ThemeName::Midnight).field.count);
    }

    #[test]
    fn invalid_fps_is_rejected() {
        let cli = Cli::parse_from(["nameheart", "--theme", "classic", "--fps", "0"]);
        assert!(load_config(&cli).is_err());
    }
}
