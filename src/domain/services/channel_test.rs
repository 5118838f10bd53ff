use anyhow::Result;

use super::SerialChannel;
use crate::domain::models::ChannelError;
use crate::domain::models::ChannelSettings;
use crate::domain::models::Command;
use crate::domain::models::MAX_PAYLOAD_LEN;
use crate::infrastructure::serial::mock::MockConnector;
use crate::infrastructure::serial::mock::MockWrite;

const PORT: &str = "/dev/ttyMOCK0";

fn channel(connector: &MockConnector) -> SerialChannel {
    return SerialChannel::new(Box::new(connector.clone()), ChannelSettings::default());
}

#[test]
fn it_uses_default_settings() {
    let connector = MockConnector::new(&[PORT]);
    let channel = channel(&connector);

    assert_eq!(channel.settings().baud_rate, 115_200);
    assert_eq!(channel.settings().timeout.as_millis(), 500);
    assert!(!channel.is_connected());
    assert_eq!(channel.port(), None);
}

#[test]
fn it_connects_to_valid_port() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    assert!(channel.is_connected());
    assert_eq!(channel.port(), Some(PORT));
    return Ok(());
}

#[test]
fn it_fails_to_connect_to_invalid_port() {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    let err = channel.connect("/dev/nope").unwrap_err();

    assert!(matches!(err, ChannelError::ConnectionFailed { .. }));
    insta::assert_snapshot!(err.to_string(), @"Unable to open serial port /dev/nope: No such file or directory");
    assert!(!channel.is_connected());
    assert_eq!(channel.port(), None);
}

#[test]
fn it_keeps_previous_connection_on_failed_connect() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    assert!(channel.connect("COM99").is_err());
    assert!(channel.is_connected());
    assert_eq!(channel.port(), Some(PORT));

    channel.send('s', None)?;
    assert_eq!(connector.writes(), vec![(PORT.to_string(), b"s".to_vec())]);
    return Ok(());
}

#[test]
fn it_replaces_connection_on_reconnect() -> Result<()> {
    let connector = MockConnector::new(&[PORT, "/dev/ttyMOCK1"]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;
    channel.connect("/dev/ttyMOCK1")?;
    channel.send('s', None)?;

    assert_eq!(channel.port(), Some("/dev/ttyMOCK1"));
    assert_eq!(connector.writes()[0].0, "/dev/ttyMOCK1".to_string());
    return Ok(());
}

#[test]
fn it_sends_start() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    let written = channel.send('s', None)?;

    assert_eq!(written, 1);
    assert_eq!(connector.writes(), vec![(PORT.to_string(), vec![b's'])]);
    return Ok(());
}

#[test]
fn it_sends_data_with_payload() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    let written = channel.send('a', Some(&b"\x01"[..]))?;

    assert_eq!(written, 2);
    assert_eq!(connector.writes(), vec![(PORT.to_string(), vec![b'a', 0x01])]);
    return Ok(());
}

#[test]
fn it_sends_each_payload_in_a_single_write() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    for payload in [vec![], vec![0x00], b"hello".to_vec(), vec![0xab; MAX_PAYLOAD_LEN]] {
        channel.send('a', Some(payload.as_slice()))?;
    }

    let writes = connector.writes();
    assert_eq!(writes.len(), 4);
    assert_eq!(writes[0].1, b"a".to_vec());
    assert_eq!(writes[1].1, vec![b'a', 0x00]);
    assert_eq!(writes[2].1, b"ahello".to_vec());
    assert_eq!(writes[3].1.len(), MAX_PAYLOAD_LEN + 1);
    assert_eq!(writes[3].1[0], b'a');
    return Ok(());
}

#[test]
fn it_fails_to_send_when_not_connected() {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);

    assert!(matches!(
        channel.send('s', None),
        Err(ChannelError::NotConnected)
    ));
    assert!(matches!(
        channel.send_command(&Command::watering_state(true)),
        Err(ChannelError::NotConnected)
    ));
    assert!(connector.writes().is_empty());
}

#[test]
fn it_fails_to_send_after_close() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;
    channel.close();
    channel.close();

    assert!(!channel.is_connected());
    assert_eq!(channel.port(), None);
    assert!(matches!(
        channel.send('s', None),
        Err(ChannelError::NotConnected)
    ));
    assert!(connector.writes().is_empty());
    return Ok(());
}

#[test]
fn it_rejects_oversized_payload_without_writing() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    let payload = vec![0u8; MAX_PAYLOAD_LEN + 1];
    let res = channel.send('a', Some(payload.as_slice()));

    assert!(matches!(res, Err(ChannelError::InvalidPayload(_))));
    assert!(connector.writes().is_empty());
    return Ok(());
}

#[test]
fn it_rejects_unknown_tag_without_writing() -> Result<()> {
    let connector = MockConnector::new(&[PORT]);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    assert!(matches!(
        channel.send('x', None),
        Err(ChannelError::InvalidPayload(_))
    ));
    assert!(connector.writes().is_empty());
    return Ok(());
}

#[test]
fn it_reports_partial_writes() -> Result<()> {
    let connector = MockConnector::new(&[PORT]).with_behaviour(MockWrite::Short(3));
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    let written = channel.send('a', Some(&b"watering"[..]))?;

    assert_eq!(written, 3);
    assert_eq!(connector.writes(), vec![(PORT.to_string(), b"awa".to_vec())]);
    return Ok(());
}

#[test]
fn it_reports_write_timeouts() -> Result<()> {
    let connector = MockConnector::new(&[PORT]).with_behaviour(MockWrite::TimedOut);
    let mut channel = channel(&connector);
    channel.connect(PORT)?;

    let err = channel.send('s', None).unwrap_err();

    assert!(matches!(err, ChannelError::WriteTimeout { written: 0 }));
    assert_eq!(connector.writes().len(), 1);
    return Ok(());
}
