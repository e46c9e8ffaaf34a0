//! Crate-wide error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The host could not hand out a drawing surface (no canvas, no 2d context)
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(&'static str),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("config rejected: {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A browser API call failed
    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Js(format!("{:?}", value))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
