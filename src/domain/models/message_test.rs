use super::Author;
use super::Message;
use super::MessageType;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Waterline, "Connected to /dev/ttyUSB0");
    assert_eq!(msg.author, Author::Waterline);
    assert_eq!(msg.author.to_string(), "Waterline");
    assert_eq!(msg.text, "Connected to /dev/ttyUSB0".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Author::Operator, "\t\ts");
    assert_eq!(msg.author.to_string(), "You");
    assert_eq!(msg.text, "    s".to_string());
}

#[test]
fn it_executes_error() {
    let msg = Message::error("It broke!");
    assert_eq!(msg.author, Author::Waterline);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_wraps_long_lines() {
    let msg = Message::new(
        Author::Waterline,
        "Moisture dropped below the threshold of fifty percent",
    );
    let lines = msg.as_string_lines(20);

    assert_eq!(
        lines,
        vec![
            "Moisture dropped".to_string(),
            "below the threshold".to_string(),
            "of fifty percent".to_string(),
        ]
    );
}

#[test]
fn it_keeps_blank_lines() {
    let msg = Message::new(Author::Waterline, "first\n\nsecond");
    assert_eq!(
        msg.as_string_lines(80),
        vec!["first".to_string(), " ".to_string(), "second".to_string()]
    );
}

#[test]
fn it_does_not_emit_empty_lines_for_long_words() {
    let msg = Message::new(Author::Waterline, "aaaaaaaaaaaaaaaaaaaaaaaaa");
    assert_eq!(
        msg.as_string_lines(10),
        vec!["aaaaaaaaaaaaaaaaaaaaaaaaa".to_string()]
    );
}
