use std::io;
use std::io::Write;

use anyhow::Result;

use crate::domain::models::ChannelSettings;
use crate::domain::models::Connection;
use crate::domain::models::ConnectionBox;
use crate::domain::models::Connector;

/// A port opened through the `serialport` crate, 8N1 with no flow control.
pub struct NativeConnection {
    port: Box<dyn serialport::SerialPort>,
}

impl Connection for NativeConnection {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        return self.port.write(bytes);
    }
}

#[derive(Default)]
pub struct NativeConnector {}

impl Connector for NativeConnector {
    fn open(&self, port: &str, settings: &ChannelSettings) -> Result<ConnectionBox> {
        let serial_port = serialport::new(port, settings.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .flow_control(serialport::FlowControl::None)
            .timeout(settings.timeout)
            .open()?;

        tracing::debug!(
            port,
            baud_rate = settings.baud_rate,
            timeout_ms = settings.timeout.as_millis() as u64,
            "Opened serial port"
        );

        return Ok(Box::new(NativeConnection { port: serial_port }));
    }
}
