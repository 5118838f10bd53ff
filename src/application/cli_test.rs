use anyhow::Result;

use super::build;
use super::serial_command_from_args;
use crate::domain::models::Command;

#[test]
fn it_builds_send_commands() -> Result<()> {
    let payload = r"on\x01".to_string();
    let command = serial_command_from_args("a", Some(&payload))?;
    assert_eq!(command, Command::send_data(vec![b'o', b'n', 0x01]));

    assert_eq!(serial_command_from_args("s", None)?, Command::start());
    return Ok(());
}

#[test]
fn it_rejects_multi_character_tags() {
    let err = serial_command_from_args("start", None).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Tag must be a single character, got 'start'");
}

#[test]
fn it_rejects_payload_on_start() {
    let payload = "x".to_string();
    assert!(serial_command_from_args("s", Some(&payload)).is_err());
}

#[test]
fn it_parses_send_subcommand() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["waterline", "send", "a", "hello"])?;
    let send_matches = matches.subcommand_matches("send").expect("send subcommand");

    assert_eq!(send_matches.get_one::<String>("tag").map(|e| return e.as_str()), Some("a"));
    assert_eq!(
        send_matches.get_one::<String>("payload").map(|e| return e.as_str()),
        Some("hello")
    );
    return Ok(());
}

#[test]
fn it_requires_an_id_or_all_to_delete_sessions() {
    let res = build().try_get_matches_from(vec!["waterline", "sessions", "delete"]);
    assert!(res.is_err());
}
