use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("invalid time domain: start={start} is after end={end}")]
    InvalidDomain { start: i64, end: i64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render backend error: {0}")]
    Backend(String),
}
