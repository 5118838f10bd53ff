use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}
#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse(" ").is_none());
}
#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}
#[test]
fn it_parse_raw_command() {
    assert!(SlashCommand::parse("s").is_none());
    assert!(SlashCommand::parse("a\\x01").is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q");
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/q").unwrap().is_quit());
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
}
#[test]
fn it_is_not_quit() {
    assert!(!SlashCommand::parse("/t 40").unwrap().is_quit());
}

#[test]
fn it_is_connect_with_port() {
    let cmd = SlashCommand::parse("/connect /dev/ttyUSB0").unwrap();
    assert!(cmd.is_connect());
    assert_eq!(cmd.args, vec!["/dev/ttyUSB0".to_string()]);
}
#[test]
fn it_is_short_connect() {
    assert!(SlashCommand::parse("/c COM3").unwrap().is_connect());
}

#[test]
fn it_is_disconnect() {
    assert!(SlashCommand::parse("/d").unwrap().is_disconnect());
    assert!(SlashCommand::parse("/disconnect").unwrap().is_disconnect());
}

#[test]
fn it_is_threshold() {
    let cmd = SlashCommand::parse("/threshold   65 ").unwrap();
    assert!(cmd.is_threshold());
    assert_eq!(cmd.args, vec!["65".to_string()]);
}
#[test]
fn it_is_not_threshold() {
    assert!(!SlashCommand::parse("/i 5").unwrap().is_threshold());
}

#[test]
fn it_is_interval() {
    assert!(SlashCommand::parse("/i 5").unwrap().is_interval());
    assert!(SlashCommand::parse("/interval 2.5").unwrap().is_interval());
}

#[test]
fn it_is_toggle() {
    assert!(SlashCommand::parse("/w").unwrap().is_toggle());
    assert!(SlashCommand::parse("/toggle").unwrap().is_toggle());
}

#[test]
fn it_is_start() {
    assert!(SlashCommand::parse("/s").unwrap().is_start());
    assert!(SlashCommand::parse("/start").unwrap().is_start());
}

#[test]
fn it_is_sample() {
    let cmd = SlashCommand::parse("/sample 5 42").unwrap();
    assert!(cmd.is_sample());
    assert_eq!(cmd.args, vec!["5".to_string(), "42".to_string()]);
}

#[test]
fn it_is_save() {
    assert!(SlashCommand::parse("/save").unwrap().is_save());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}
#[test]
fn it_is_not_help() {
    assert!(!SlashCommand::parse("/s").unwrap().is_help());
}
