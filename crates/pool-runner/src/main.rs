use std::error::Error;

use pool_engine::{FrameLimiter, GameConfig, PoolGame};
use pool_runner::{Autopilot, GameRunner, HeadlessRenderer};

/// Frame budget when none is given on the command line (five minutes at 120 Hz).
const DEFAULT_MAX_FRAMES: u64 = 36_000;

/// Usage: `pool-practice [MAX_FRAMES] [--fast]`
///
/// `--fast` skips the frame limiter and runs frames back to back.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut max_frames = DEFAULT_MAX_FRAMES;
    let mut fast = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--fast" => fast = true,
            other => max_frames = other.parse()?,
        }
    }

    let config = GameConfig::default();
    let limiter = if fast {
        FrameLimiter::unlimited()
    } else {
        FrameLimiter::new(config.fps)
    };
    log::info!("Pool practice starting: up to {max_frames} frames, fast = {fast}");

    let game = PoolGame::new(config)?;
    let mut runner = GameRunner::new(
        game,
        HeadlessRenderer::default(),
        Box::new(Autopilot::new(max_frames)),
        limiter,
    );
    let summary = runner.run();

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
