use thiserror::Error;

/// Rejected configuration values. Raised before anything is generated or wired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("layer {layer}: radius band must be finite with radius_min > 0 and spread >= 0 (got min={min}, spread={spread})")]
    RadiusBand { layer: usize, min: f32, spread: f32 },

    #[error("layer {layer}: opacity {opacity} is outside [0, 1]")]
    Opacity { layer: usize, opacity: f32 },

    #[error("layer {layer}: {field} must be finite and non-negative (got {value})")]
    LayerValue {
        layer: usize,
        field: &'static str,
        value: f32,
    },

    #[error("{name} damping factor {value} must lie in (0, 1]")]
    Damping { name: &'static str, value: f32 },

    #[error("{name} must be finite and positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("visibility ratio threshold {0} is outside [0, 1]")]
    RatioThreshold(f32),

    #[error("field has no layers")]
    EmptyField,
}
