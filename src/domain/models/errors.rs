use thiserror::Error;

/// Failures reported by the serial command channel. None of them are fatal,
/// the operator can reconnect or resend.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Unable to open serial port {port}: {reason}")]
    ConnectionFailed { port: String, reason: String },

    #[error("No serial port is connected. Connect first with `/connect PORT`.")]
    NotConnected,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Serial write timed out after {written} byte(s) were written")]
    WriteTimeout { written: usize },

    #[error("Serial write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Operator input rejected by the watering session.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(i64),

    #[error("Interval must be a positive number of minutes, got {0}")]
    InvalidInterval(f64),

    #[error("Sample at {time} min is not after the last sample at {last} min")]
    OutOfOrderSample { time: f64, last: f64 },

    #[error("Invalid sample: {0}")]
    InvalidSample(String),
}
