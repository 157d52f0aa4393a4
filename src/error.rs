use thiserror::Error;

/// Reasons a `Params` value cannot drive the simulation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{parameter} bounds are inverted: min {min} is greater than max {max}")]
    InvertedBounds {
        parameter: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{parameter} step must be positive, got {step}")]
    NonPositiveStep { parameter: &'static str, step: f64 },

    #[error("{parameter} must stay strictly positive, lower bound is {min}")]
    NonPositiveLowerBound { parameter: &'static str, min: f64 },

    #[error("start displacement {value} lies outside [{min}, {max}]")]
    DisplacementOutOfBounds { value: f64, min: f64, max: f64 },

    #[error("tick interval must be at least one millisecond")]
    ZeroTickInterval,

    #[error("a {width}x{height} canvas leaves no room for the graph")]
    CanvasTooSmall { width: f32, height: f32 },
}
