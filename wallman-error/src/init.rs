use thiserror::Error;

/// Error raised while wiring the process together at startup
#[derive(Error, Debug)]
pub enum InitContextError {
    /// Returned when a primitive error occurs
    #[error("primitive error: {0}")]
    Primitive(String),
}
