//! Normalizes touch and mouse input into a single `tap` event.
//!
//! [`recognizer::TapRecognizer`] holds the gesture logic and works on plain
//! values, so it runs anywhere. [`dom::TapBinding`] wires it to a DOM root.

pub mod clock;
pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod recognizer;
pub mod state;
pub mod util;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TapConfig, EMULATION_WINDOW_MS};
pub use dom::{TapBinding, TAP_EVENT};
pub use error::{ConfigError, TapError};
pub use model::{Coordinates, InputSignal, MouseButton, Point, PointerKind, Source, TapEvent};
pub use recognizer::{
    CancelCause, CancelOutcome, ClickOutcome, DownOutcome, EndOutcome, Ignored, Rejection,
    TapRecognizer,
};
