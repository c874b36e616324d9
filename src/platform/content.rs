//! Texture lookup by symbolic name
//!
//! Handles are opaque to the simulation. Dimensions are only used to work out
//! how many animation frames a sprite sheet holds.

use std::collections::HashMap;

/// Opaque texture handle issued by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// A texture handle plus its pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texture {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Number of `frame_height`-tall frames stacked in this sheet (at least 1)
    pub fn frame_rows(&self, frame_height: u32) -> u32 {
        if frame_height == 0 {
            return 1;
        }
        (self.height / frame_height).max(1)
    }
}

/// Texture provider
pub trait Content {
    /// Resolve a texture by name. Unknown names must still return a usable handle.
    fn texture(&self, name: &str) -> Texture;
}

/// In-memory name → texture registry
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    textures: HashMap<String, Texture>,
    next_id: u32,
}

/// Returned for names that were never registered
pub const MISSING_TEXTURE: Texture = Texture {
    id: TextureId(u32::MAX),
    width: 1,
    height: 1,
};

impl TextureAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture and return its handle
    pub fn register(&mut self, name: &str, width: u32, height: u32) -> Texture {
        let texture = Texture {
            id: TextureId(self.next_id),
            width,
            height,
        };
        self.next_id += 1;
        self.textures.insert(name.to_string(), texture);
        texture
    }

    /// Atlas preloaded with every sprite the built-in stages reference
    pub fn with_defaults() -> Self {
        let mut atlas = Self::new();
        atlas.register("player", 32, 32 * 4);
        atlas.register("witch", 24, 24 * 3);
        atlas.register("VanillaBullet", 16, 16 * 4);
        atlas.register("shield", 32, 32 * 3);
        atlas.register("death", 32, 32 * 10);
        atlas
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Content for TextureAtlas {
    fn texture(&self, name: &str) -> Texture {
        match self.textures.get(name) {
            Some(texture) => *texture,
            None => {
                log::warn!("Unknown texture '{}', using placeholder", name);
                MISSING_TEXTURE
            }
        }
    }
}
