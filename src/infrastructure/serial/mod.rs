#[cfg(test)]
pub mod mock;
pub mod native;

use anyhow::Result;

use crate::domain::models::ConnectorBox;

pub struct ConnectorManager {}

impl ConnectorManager {
    pub fn get() -> ConnectorBox {
        return Box::<native::NativeConnector>::default();
    }

    /// Port names the operating system currently reports, sorted.
    pub fn available_ports() -> Result<Vec<String>> {
        let mut ports = serialport::available_ports()?
            .into_iter()
            .map(|info| return info.port_name)
            .collect::<Vec<String>>();
        ports.sort();

        return Ok(ports);
    }
}
