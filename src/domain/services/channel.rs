#[cfg(test)]
#[path = "channel_test.rs"]
mod tests;

use std::io;

use crate::domain::models::ChannelError;
use crate::domain::models::ChannelSettings;
use crate::domain::models::Command;
use crate::domain::models::ConnectionBox;
use crate::domain::models::ConnectorBox;

/// Owns at most one open serial connection and pushes encoded commands down
/// it. No framing, no read-back, no retries: callers decide what `s` and `a`
/// mean to the board.
pub struct SerialChannel {
    connector: ConnectorBox,
    settings: ChannelSettings,
    connection: Option<ConnectionBox>,
    port: Option<String>,
}

impl SerialChannel {
    pub fn new(connector: ConnectorBox, settings: ChannelSettings) -> SerialChannel {
        return SerialChannel {
            connector,
            settings,
            connection: None,
            port: None,
        };
    }

    pub fn settings(&self) -> &ChannelSettings {
        return &self.settings;
    }

    pub fn port(&self) -> Option<&str> {
        return self.port.as_deref();
    }

    pub fn is_connected(&self) -> bool {
        return self.connection.is_some();
    }

    /// Opens `port`, replacing any current connection on success. On failure
    /// the current connection is left as it was.
    pub fn connect(&mut self, port: &str) -> Result<(), ChannelError> {
        match self.connector.open(port, &self.settings) {
            Ok(connection) => {
                self.connection = Some(connection);
                self.port = Some(port.to_string());
                tracing::info!(port, "Connected to serial port");

                return Ok(());
            }
            Err(err) => {
                tracing::warn!(port, error = ?err, "Failed to open serial port");

                return Err(ChannelError::ConnectionFailed {
                    port: port.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    pub fn close(&mut self) {
        if let Some(port) = self.port.take() {
            tracing::info!(port, "Closed serial port");
        }
        self.connection = None;
    }

    /// Sends `tag` followed by `payload`. Returns how many bytes the device
    /// accepted, which can be fewer than were encoded.
    pub fn send(&mut self, tag: char, payload: Option<&[u8]>) -> Result<usize, ChannelError> {
        if !self.is_connected() {
            return Err(ChannelError::NotConnected);
        }

        let command = Command::from_parts(tag, payload)?;
        return self.send_command(&command);
    }

    pub fn send_command(&mut self, command: &Command) -> Result<usize, ChannelError> {
        let connection = self
            .connection
            .as_mut()
            .ok_or(ChannelError::NotConnected)?;
        let bytes = command.encode()?;

        match connection.write(&bytes) {
            Ok(written) => {
                if written < bytes.len() {
                    tracing::warn!(
                        command = command.to_string(),
                        written,
                        expected = bytes.len(),
                        "Partial serial write"
                    );
                } else {
                    tracing::debug!(command = command.to_string(), written, "Sent command");
                }

                return Ok(written);
            }
            Err(err) if err.kind() == io::ErrorKind::TimedOut => {
                tracing::warn!(command = command.to_string(), "Serial write timed out");
                return Err(ChannelError::WriteTimeout { written: 0 });
            }
            Err(err) => {
                tracing::error!(command = command.to_string(), error = ?err, "Serial write failed");
                return Err(ChannelError::Io(err));
            }
        }
    }
}
