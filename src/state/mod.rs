pub mod gesture;
pub mod last_tap;
pub mod touch;

pub use gesture::{GestureState, Tracking};
pub use last_tap::LastTap;
pub use touch::TouchMark;
