//! Platform abstraction layer
//!
//! The simulation never polls devices or loads files. It reads these instead:
//! - Input: a per-frame snapshot with read-once button presses
//! - Content: texture handles and their dimensions by name
//! - Shake: a camera-feedback side channel

pub mod content;
pub mod input;
pub mod shake;

pub use content::{Content, Texture, TextureAtlas, TextureId};
pub use input::InputSnapshot;
pub use shake::{NoShake, ScreenShake, ShakeLog, ShakeSink};
