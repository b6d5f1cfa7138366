use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be a finite number greater than zero, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("malformed tap config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while wiring the recognizer into the DOM.
/// Input handling itself never fails; bad signals are dropped.
#[derive(Error, Debug)]
pub enum TapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for TapError {
    fn from(value: JsValue) -> Self {
        TapError::Dom(format!("{:?}", value))
    }
}
