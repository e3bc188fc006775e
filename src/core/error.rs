use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlochError {
    #[error("Invalid probability: {0} (expected a value in [0, 1])")]
    InvalidProbability(f64),

    #[error("Degenerate state: amplitude pair has zero norm")]
    DegenerateState,

    #[error("no display available: {0}")]
    NoDisplaySurface(String),

    #[error("Invalid shot count: shots per frame must be at least 1")]
    InvalidShots,

    #[error("Invalid gate: {0}")]
    InvalidGate(String),

    #[error("Operator not unitary (‖UᴴU−I‖∞={0:e})")]
    NonUnitary(f64),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlochError {
    pub fn no_display(message: &str) -> Self { BlochError::NoDisplaySurface(message.to_string()) }
    pub fn invalid_gate(message: &str) -> Self { BlochError::InvalidGate(message.to_string()) }
}

pub type Result<T> = std::result::Result<T, BlochError>;
