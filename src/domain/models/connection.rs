use std::io;
use std::time::Duration;

use anyhow::Result;

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSettings {
    pub baud_rate: u32,
    /// Upper bound for a single write before it fails as timed out.
    pub timeout: Duration,
}

impl Default for ChannelSettings {
    fn default() -> ChannelSettings {
        return ChannelSettings {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        };
    }
}

/// An open serial device binding.
pub trait Connection: Send {
    /// Performs a single write, returning how many bytes the device accepted.
    /// A write that runs past the configured timeout fails with
    /// `io::ErrorKind::TimedOut`.
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

/// Opens connections by port name. The seam that keeps the channel
/// independent of any particular serial library.
pub trait Connector: Send {
    fn open(&self, port: &str, settings: &ChannelSettings) -> Result<ConnectionBox>;
}

pub type ConnectionBox = Box<dyn Connection>;
pub type ConnectorBox = Box<dyn Connector>;
