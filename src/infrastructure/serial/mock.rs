use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ChannelSettings;
use crate::domain::models::Connection;
use crate::domain::models::ConnectionBox;
use crate::domain::models::Connector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockWrite {
    /// Accept every byte.
    Full,
    /// Accept at most this many bytes per write.
    Short(usize),
    TimedOut,
}

/// In-memory port that records every write call it receives.
pub struct MockConnection {
    port: String,
    behaviour: MockWrite,
    writes: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl Connection for MockConnection {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut writes = self.writes.lock().unwrap();
        match self.behaviour {
            MockWrite::Full => {
                writes.push((self.port.to_string(), bytes.to_vec()));
                return Ok(bytes.len());
            }
            MockWrite::Short(limit) => {
                let accepted = bytes.len().min(limit);
                writes.push((self.port.to_string(), bytes[..accepted].to_vec()));
                return Ok(accepted);
            }
            MockWrite::TimedOut => {
                writes.push((self.port.to_string(), vec![]));
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "Operation timed out",
                ));
            }
        }
    }
}

#[derive(Clone)]
pub struct MockConnector {
    valid_ports: Vec<String>,
    behaviour: MockWrite,
    writes: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MockConnector {
    pub fn new(valid_ports: &[&str]) -> MockConnector {
        return MockConnector {
            valid_ports: valid_ports.iter().map(|e| return e.to_string()).collect(),
            behaviour: MockWrite::Full,
            writes: Arc::new(Mutex::new(vec![])),
        };
    }

    pub fn with_behaviour(mut self, behaviour: MockWrite) -> MockConnector {
        self.behaviour = behaviour;
        return self;
    }

    /// Every write call seen so far, as (port, bytes accepted).
    pub fn writes(&self) -> Vec<(String, Vec<u8>)> {
        return self.writes.lock().unwrap().clone();
    }
}

impl Connector for MockConnector {
    fn open(&self, port: &str, _settings: &ChannelSettings) -> Result<ConnectionBox> {
        if !self.valid_ports.contains(&port.to_string()) {
            bail!("No such file or directory");
        }

        return Ok(Box::new(MockConnection {
            port: port.to_string(),
            behaviour: self.behaviour,
            writes: Arc::clone(&self.writes),
        }));
    }
}
