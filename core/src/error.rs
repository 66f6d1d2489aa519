use thiserror::Error;

pub type Result<T> = std::result::Result<T, NoiseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    // gen_int called with min > max
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    // A sample left its documented bound; points at broken gradient or weight math
    #[error("sample {value} is outside [-{bound}, {bound}]")]
    InvariantViolation { value: f64, bound: f64 },

    #[error("base table is not a permutation of 0..=255: {0}")]
    InvalidPermutation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
