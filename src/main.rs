//! Terminal stopwatch.
//!
//! Press `s` to start, `t` to stop, `r` to reset, `h` to toggle the header
//! and footer, `q` to quit. Buttons respond to clicks and to Enter/Space
//! when focused (Tab moves focus).

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::select;
use std::fs::File;
use std::path::{Path, PathBuf};
use stopwatch::{
    AppAction, AppConfig, Engine, EngineConfig, InputEvent, StopwatchApp, ThemeName, TickerActor,
};

#[derive(Parser, Debug)]
#[command(version, about = "A terminal stopwatch with start, stop and reset")]
struct Cli {
    /// Display refresh rate while running
    #[arg(long, default_value_t = 60, value_name = "HZ", value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeName::Nord)]
    theme: ThemeName,

    /// Start with the header and footer visible
    #[arg(long)]
    show_chrome: bool,

    /// Do not capture the mouse (buttons stay keyboard-operable)
    #[arg(long)]
    no_mouse: bool,

    /// Draw in the main screen instead of the alternate screen
    #[arg(long)]
    inline: bool,

    /// Title shown in the header
    #[arg(long, default_value = "Stopwatch")]
    title: String,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            target_fps: self.fps,
            enable_mouse: !self.no_mouse,
            alternate_screen: !self.inline,
            ..EngineConfig::default()
        }
    }

    fn app_config(&self) -> AppConfig {
        AppConfig {
            title: self.title.clone(),
            theme: self.theme,
            show_chrome: self.show_chrome,
        }
    }
}

/// The terminal owns stderr, so logging only happens into a file.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    use env_logger::{Builder, Env, Target};

    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn handle_event(engine: &mut Engine, app: &mut StopwatchApp, ticker: &TickerActor, event: &InputEvent) {
    if let InputEvent::Resize { width, height } = *event {
        engine.handle_resize(width, height);
    }
    match app.handle_event(event) {
        AppAction::Quit => engine.stop(),
        AppAction::RunningChanged(running) => {
            if running {
                ticker.resume();
            } else {
                ticker.pause();
            }
            present(engine, app);
        }
        AppAction::Redraw => present(engine, app),
        AppAction::None => {}
    }
}

fn present(engine: &mut Engine, app: &mut StopwatchApp) {
    app.render(engine.buffer_mut());
    engine.present();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.engine_config();
    let interval = config.frame_interval();
    let mut engine = Engine::with_config(config).context("failed to initialize terminal")?;
    let mut app = StopwatchApp::new(cli.app_config(), engine.width(), engine.height());

    // Silent until the stopwatch starts.
    let ticker = TickerActor::spawn_paused(interval).context("failed to spawn ticker thread")?;
    log::info!("refreshing every {interval:?} while running");

    app.render(engine.buffer_mut());
    engine.present_full();

    while engine.is_running() {
        select! {
            recv(engine.input_receiver()) -> result => match result {
                Ok(event) => handle_event(&mut engine, &mut app, &ticker, &event),
                Err(_) => {
                    log::error!("input channel closed");
                    engine.stop();
                }
            },

            recv(ticker.receiver()) -> result => {
                if result.is_ok() && app.tick() {
                    present(&mut engine, &mut app);
                }
            }
        }
    }

    ticker.join();
    Ok(())
}
