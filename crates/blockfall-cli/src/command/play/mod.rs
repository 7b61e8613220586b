use blockfall_engine::{GameSession, PieceSeed};
use blockfall_runtime::Runtime;

use self::app::PlayApp;
use super::ConfigArg;

mod app;
mod screen;

const DEFAULT_FPS: u16 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(crate) config: ConfigArg,
    /// Frames (ticks and renders) per second
    #[clap(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u16).range(1..=240))]
    pub(crate) fps: u16,
    /// Hex seed for the piece sequence (32 hex digits)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: ConfigArg::default(),
            fps: DEFAULT_FPS,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config, fps, seed } = arg;

    let config = config.load()?;
    let session = match seed {
        Some(seed) => GameSession::with_seed(config, *seed),
        None => GameSession::new(config),
    };

    let mut app = PlayApp::new(session, *fps);
    Runtime::new().run(&mut app)?;

    let stats = app.session().stats();
    println!(
        "Score: {}  Level: {}  Lines: {}",
        stats.score(),
        stats.level(),
        stats.total_cleared_lines()
    );
    Ok(())
}
