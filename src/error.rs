use thiserror::Error;

/// Problems found while loading or validating map configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed map config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSS length {0:?}")]
    InvalidLength(String),
    #[error("scale range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidScaleRange { min: f64, max: f64 },
    #[error("zoom {name} must be a positive finite number, got {value}")]
    InvalidZoomPolicy { name: &'static str, value: f64 },
    #[error("{field} must be a positive finite number, got {value}")]
    InvalidMapSize { field: &'static str, value: f64 },
    #[error("initScale must be a positive finite number, got {0}")]
    InvalidInitScale(f64),
    #[error("pin {id}: {reason}")]
    InvalidPin { id: String, reason: &'static str },
    #[error("duplicate pin id {0}")]
    DuplicatePinId(String),
}
