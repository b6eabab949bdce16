//! # Orrery
//!
//! A toy model of a planetary system: coloured bodies circle a shared,
//! pannable reference point at independently configured angular speeds.
//! Every body is animated by its own worker thread; a renderer samples the
//! latest published positions whenever it draws.
//!
//! ## Quick Start
//!
//! ```ignore
//! use orrery::prelude::*;
//! use std::sync::Arc;
//!
//! let config = SystemConfig::default();
//! let mut scene = Scene::from_config(&config, config.initial_reference_point())?;
//! scene.start(Arc::new(|| { /* ask the window to repaint */ }))?;
//!
//! // On every repaint:
//! let frame = compose_frame(
//!     &scene.snapshot(),
//!     scene.reference_point(),
//!     &StarField::random(config.star_count, DVec2::new(1200.0, 800.0)),
//!     &ViewOptions::default(),
//! );
//!
//! // On shutdown (also happens on drop):
//! scene.shutdown();
//! ```
//!
//! ## Core Concepts
//!
//! ### Bodies
//!
//! A [`Body`] has a fixed orbit radius (the length of its offset from its
//! orbit centre), a fixed reference offset (from the shared reference point
//! to its orbit centre) and an angular speed. Each tick advances its phase
//! and projects:
//!
//! ```text
//! position = reference_point + reference_offset + orbit_radius * (cos phase, sin phase)
//! ```
//!
//! ### Scene
//!
//! A [`Scene`] owns the bodies, the shared reference point, the freeze flag
//! and the speed scale. While running, each body's worker ticks every
//! `tick_interval`, publishes its state and requests a redraw.
//! [`Scene::shutdown`] wakes and joins every worker.
//!
//! ### Rendering
//!
//! [`compose_frame`] turns a snapshot into [`Shape`]s; the viewer crate
//! paints them with egui.

pub mod body;
pub mod config;
pub mod error;
pub mod input;
pub mod presets;
pub mod render;
pub mod scene;
pub mod stars;
pub mod time;

pub use body::{Body, Rgb, PHASE_STEP};
pub use config::{BodyConfig, PanConfig, SystemConfig};
pub use error::{ConfigError, SceneError};
pub use glam::DVec2;
pub use input::{Action, Input, InputEvent, KeyCode, MouseButton};
pub use presets::{Preset, PRESETS};
pub use render::{compose_frame, Shape, View, ViewOptions};
pub use scene::{BodyInfo, BodySnapshot, Redraw, Scene, SceneSettings, MAX_SPEED_SCALE};
pub use stars::{Star, StarField};
pub use time::{RateMeter, TickClock, TickPolicy};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use orrery::prelude::*;
/// ```
pub mod prelude {
    pub use crate::body::{Body, Rgb};
    pub use crate::config::{BodyConfig, PanConfig, SystemConfig};
    pub use crate::error::{ConfigError, SceneError};
    pub use crate::input::{Action, Input, InputEvent, KeyCode, MouseButton};
    pub use crate::render::{compose_frame, Shape, ViewOptions};
    pub use crate::scene::{BodySnapshot, Redraw, Scene, SceneSettings};
    pub use crate::stars::StarField;
    pub use crate::time::TickPolicy;
    pub use glam::DVec2;
}
