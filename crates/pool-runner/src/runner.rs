use pool_engine::{
    BallId, FrameData, FrameLimiter, HudState, InputEvent, InputQueue, PoolGame, PotEvent, Renderer,
};
use serde::Serialize;

/// Where the runner gets input from each frame: a window's event pump, a
/// scripted player, a replay.
pub trait InputSource {
    /// Push this frame's events. Called once before every frame with the
    /// game as it stood after the previous one.
    fn poll(&mut self, game: &PoolGame, queue: &mut InputQueue);
}

/// Input source that never produces events.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _game: &PoolGame, _queue: &mut InputQueue) {}
}

/// Final state of a run, printed by the binary on exit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub shots: u32,
    pub lives: u32,
    pub game_over: bool,
    /// Object balls in the order they were potted.
    pub potted: Vec<BallId>,
    pub scratches: u32,
    pub balls_on_table: usize,
}

/// Drives a [`PoolGame`] frame by frame: poll input, run the frame, hand it
/// to the renderer, then wait out the rest of the frame budget.
pub struct GameRunner<R: Renderer> {
    game: PoolGame,
    renderer: R,
    source: Box<dyn InputSource>,
    input: InputQueue,
    limiter: FrameLimiter,
    scratches: u32,
}

impl<R: Renderer> GameRunner<R> {
    pub fn new(
        game: PoolGame,
        renderer: R,
        source: Box<dyn InputSource>,
        limiter: FrameLimiter,
    ) -> Self {
        Self {
            game,
            renderer,
            source,
            input: InputQueue::new(),
            limiter,
            scratches: 0,
        }
    }

    /// Push an input event ahead of the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame. Returns whether the loop should keep going.
    pub fn tick(&mut self) -> bool {
        if !self.game.is_running() {
            return false;
        }

        self.source.poll(&self.game, &mut self.input);
        let pots = self.game.frame(&mut self.input, &mut self.renderer);
        self.scratches += pots
            .iter()
            .filter(|p| matches!(p, PotEvent::CueBall { .. }))
            .count() as u32;

        self.limiter.tick();
        self.game.is_running()
    }

    /// Run frames until the session stops, then summarise it.
    pub fn run(&mut self) -> RunSummary {
        log::info!("Frame loop starting");
        while self.tick() {}
        let summary = self.summary();
        log::info!(
            "Frame loop finished after {} frames, {} shots",
            summary.frames,
            summary.shots
        );
        summary
    }

    pub fn summary(&self) -> RunSummary {
        let session = self.game.session();
        RunSummary {
            frames: self.game.frame_count(),
            shots: self.game.shots_taken(),
            lives: session.lives(),
            game_over: session.is_game_over(),
            potted: session.potted().to_vec(),
            scratches: self.scratches,
            balls_on_table: self.game.registry().len(),
        }
    }

    pub fn game(&self) -> &PoolGame {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Renderer for runs without a window. Keeps the latest frame around for
/// inspection and logs a heartbeat now and then.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last_instance_count: usize,
    last_hud: Option<HudState>,
}

impl HeadlessRenderer {
    const HEARTBEAT_FRAMES: u64 = 600;

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    pub fn last_instance_count(&self) -> usize {
        self.last_instance_count
    }

    pub fn last_hud(&self) -> Option<&HudState> {
        self.last_hud.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, frame: &FrameData) {
        self.frames += 1;
        self.last_instance_count = frame.instances.len();
        if self.frames % Self::HEARTBEAT_FRAMES == 0 {
            log::debug!(
                "Frame {}: {} sprites, lives {}, {:?}",
                self.frames,
                frame.instances.len(),
                frame.hud.lives,
                frame.hud.phase
            );
        }
        self.last_hud = Some(frame.hud.clone());
    }
}
