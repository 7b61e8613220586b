use std::{path::PathBuf, time::Duration};

use blockfall_engine::{GameConfig, GameSession, GameSnapshot, PieceSeed};
use rand::Rng as _;
use rand_pcg::Pcg32;

use super::ConfigArg;
use crate::util::Output;

/// Simulated frame length: one 60 Hz frame.
const FRAME: Duration = Duration::from_micros(16_667);

/// PCG stream for simulated inputs, distinct from the piece queue's stream.
const INPUT_STREAM: u64 = 0x696e_7075_7473;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    config: ConfigArg,
    /// Hex seed for pieces and inputs (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many ticks even if the game is still running
    #[clap(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Output file path (stdout when omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        config,
        seed,
        max_ticks,
        output,
    } = arg;

    let config = config.load()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Simulating with seed {seed}");

    let snapshot = simulate(config, seed, *max_ticks);
    eprintln!(
        "Finished: state {:?}, score {}, level {}, lines {}",
        snapshot.state, snapshot.score, snapshot.level, snapshot.lines
    );
    Output::save_json(&snapshot, output.clone())
}

/// Plays one game with a random intent per frame and returns the final state.
fn simulate(config: GameConfig, seed: PieceSeed, max_ticks: u64) -> GameSnapshot {
    let mut rng = input_rng(seed);
    let mut session = GameSession::with_seed(config, seed);
    session.start();

    for _ in 0..max_ticks {
        if !session.session_state().is_running() {
            break;
        }
        match rng.random_range(0..16) {
            0..=2 => _ = session.move_left(),
            3..=5 => _ = session.move_right(),
            6..=7 => _ = session.rotate(),
            8 => _ = session.soft_drop(),
            9 => _ = session.hard_drop(),
            _ => {}
        }
        session.tick(FRAME);
    }
    session.snapshot()
}

/// Input generator keyed by the same seed as the pieces, on its own stream.
fn input_rng(seed: PieceSeed) -> Pcg32 {
    let [state @ .., _, _, _, _, _, _, _, _] = seed.to_bytes();
    Pcg32::new(u64::from_le_bytes(state), INPUT_STREAM)
}
