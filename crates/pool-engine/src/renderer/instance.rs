use bytemuck::{Pod, Zeroable};

/// Sprite identifiers understood by the render collaborator.
/// Ball sprites use the ball number directly (1-16).
pub mod sprites {
    pub const TABLE: u32 = 0;
    pub const CUE_STICK: u32 = 17;
    pub const POWER_BAR: u32 = 18;
    pub const PANEL: u32 = 19;
}

/// How `x`/`y` of an instance should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// `x`/`y` is the sprite's top-left corner.
    TopLeft,
    /// `x`/`y` is the sprite's centre; rotation happens about it.
    Center,
}

/// One sprite draw, packed as 8 floats = 32 bytes so it can be handed to a
/// GPU or foreign renderer as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in screen space.
    pub x: f32,
    /// Y position in screen space.
    pub y: f32,
    /// Drawn width. Zero means the sprite's natural size.
    pub width: f32,
    /// Drawn height. Zero means the sprite's natural size.
    pub height: f32,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f32,
    /// Sprite id (see [`sprites`]).
    pub sprite: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// 0.0 = top-left origin, 1.0 = centred.
    pub origin: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// A sprite placed by its top-left corner.
    pub fn top_left(sprite: u32, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            sprite: sprite as f32,
            alpha: 1.0,
            origin: 0.0,
        }
    }

    /// A natural-size sprite centred on `(x, y)` and rotated by `rotation` degrees.
    pub fn centered(sprite: u32, x: f32, y: f32, rotation: f32) -> Self {
        Self {
            x,
            y,
            width: 0.0,
            height: 0.0,
            rotation,
            sprite: sprite as f32,
            alpha: 1.0,
            origin: 1.0,
        }
    }

    pub fn sprite_id(&self) -> u32 {
        self.sprite as u32
    }

    pub fn origin(&self) -> Origin {
        if self.origin >= 0.5 {
            Origin::Center
        } else {
            Origin::TopLeft
        }
    }
}

/// Draw list for one frame, in back-to-front order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instances carrying the given sprite id.
    pub fn with_sprite(&self, sprite: u32) -> impl Iterator<Item = &RenderInstance> {
        self.instances.iter().filter(move |i| i.sprite_id() == sprite)
    }

    /// The whole buffer as raw floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
