use wasm_bindgen::prelude::*;

pub mod animation;
pub mod config;
pub mod error;
pub mod logging;
pub mod presets;
pub mod scroll;
pub mod shell;
pub mod surface;
pub mod swipe;
pub mod web;

// Classes exported to JavaScript
pub use web::{DomSurface, FrameLoop, HostShell, MotionPresets, SwipeDeck};

pub use animation::{Ease, Marker, Motion, Props, ScrollTriggerSpec, TriggerId, TweenId, TweenSpec};
pub use config::MotionConfig;
pub use error::{MotionError, Result};
pub use scroll::{ScrollEvent, SmoothScroll, SmoothScrollConfig};
pub use shell::{Frame, Shell};
pub use surface::{HeadlessSurface, Surface};
pub use swipe::{Direction, SwipeConfig, SwipeController};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route log output to the browser console at `level` (`trace` to `error`).
/// Only the first call takes effect.
#[wasm_bindgen]
pub fn enable_logging(level: &str) {
    logging::init_logging(level);
}
