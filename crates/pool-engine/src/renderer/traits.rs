//! Contract between the game core and whatever puts pixels on screen.
//!
//! The core never touches windows, images or fonts. Each frame it fills a
//! [`FrameData`] and hands it to a [`Renderer`]; the renderer maps sprite ids
//! to images and text sizes to fonts.

use serde::Serialize;

use super::instance::RenderInstance;
use crate::components::ball::BallId;
use crate::systems::shot::ShotPhase;

/// Font size class for HUD text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextSize {
    Regular,
    Large,
}

/// A line of text placed by its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: TextSize,
}

/// Session state shown on the heads-up display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudState {
    pub lives: u32,
    pub potted: Vec<BallId>,
    pub game_over: bool,
    pub phase: ShotPhase,
    pub power_bars: u32,
    pub texts: Vec<HudText>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            lives: 0,
            potted: Vec::new(),
            game_over: false,
            phase: ShotPhase::Aiming,
            power_bars: 0,
            texts: Vec::new(),
        }
    }
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Sprites in draw order: table, balls, cue, power bars, HUD.
    pub instances: &'a [RenderInstance],
    pub hud: &'a HudState,
    /// Screen dimensions including the HUD panel.
    pub screen_width: f32,
    pub screen_height: f32,
}

/// Render collaborator.
pub trait Renderer {
    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);
}

/// Renderer that discards every frame.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &FrameData) {}
}
