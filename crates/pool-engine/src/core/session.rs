use crate::components::ball::BallId;

/// Session-wide game state: lives, game over, potted history and the loop's
/// running flag. Owned by the game and mutated only from the frame loop.
#[derive(Debug, Clone)]
pub struct GameSession {
    lives: u32,
    game_over: bool,
    running: bool,
    potted: Vec<BallId>,
    /// Set when the cue ball drops; cleared when it is respawned for the next shot.
    cue_ball_potted: bool,
}

impl GameSession {
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            game_over: lives == 0,
            running: true,
            potted: Vec::with_capacity(BallId::OBJECT_BALLS),
            cue_ball_potted: false,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Terminal: once set it is never cleared for this session.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Potted object balls, in the order they dropped.
    pub fn potted(&self) -> &[BallId] {
        &self.potted
    }

    pub fn cue_ball_potted(&self) -> bool {
        self.cue_ball_potted
    }

    pub fn record_object_pot(&mut self, id: BallId) {
        log::info!("Ball {} potted", id.0);
        self.potted.push(id);
    }

    /// The cue ball dropped: lose a life, and end the game on the last one.
    pub fn record_cue_pot(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.cue_ball_potted = true;
        log::info!("Cue ball potted, {} lives left", self.lives);

        if self.lives == 0 && !self.game_over {
            self.game_over = true;
            log::info!("Game over");
        }
    }

    /// Clear the cue-ball-potted flag, returning whether it was set.
    pub fn take_cue_ball_potted(&mut self) -> bool {
        std::mem::take(&mut self.cue_ball_potted)
    }

    /// Stop the frame loop after the current iteration.
    pub fn quit(&mut self) {
        if self.running {
            log::info!("Quit requested");
        }
        self.running = false;
    }
}
