#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::fmt;

use strum::EnumIter;
use strum::IntoEnumIterator;

use super::ChannelError;

/// Largest payload the board's input FIFO accepts in one command.
pub const MAX_PAYLOAD_LEN: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum CommandTag {
    /// `s`, initiates a transmission on the board. Carries no payload.
    Start,
    /// `a`, writes the payload to the board's input FIFO.
    SendData,
}

impl CommandTag {
    pub fn parse(tag: char) -> Option<CommandTag> {
        return CommandTag::iter().find(|e| return e.as_char() == tag);
    }

    pub fn as_char(&self) -> char {
        match self {
            CommandTag::Start => return 's',
            CommandTag::SendData => return 'a',
        }
    }

    pub fn as_byte(&self) -> u8 {
        return self.as_char() as u8;
    }
}

impl fmt::Display for CommandTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.as_char());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub tag: CommandTag,
    pub payload: Option<Vec<u8>>,
}

impl Command {
    pub fn start() -> Command {
        return Command {
            tag: CommandTag::Start,
            payload: None,
        };
    }

    pub fn send_data(payload: Vec<u8>) -> Command {
        return Command {
            tag: CommandTag::SendData,
            payload: Some(payload),
        };
    }

    /// Watering override, the new state travels as a single `0x01`/`0x00`
    /// byte.
    pub fn watering_state(on: bool) -> Command {
        return Command::send_data(vec![u8::from(on)]);
    }

    /// Builds a command from a raw tag character and payload bytes, rejecting
    /// anything the board would not understand.
    pub fn from_parts(tag: char, payload: Option<&[u8]>) -> Result<Command, ChannelError> {
        let command_tag = CommandTag::parse(tag).ok_or_else(|| {
            return ChannelError::InvalidPayload(format!(
                "unknown command tag '{}', expected 's' or 'a'",
                tag.escape_default()
            ));
        })?;

        let command = Command {
            tag: command_tag,
            payload: payload.map(|e| return e.to_vec()),
        };
        command.validate()?;

        return Ok(command);
    }

    /// Parses operator input from the console. The first character is the
    /// tag, the rest is payload text encoded one byte per character. `\xNN`
    /// inserts a raw byte and `\\` a backslash.
    pub fn parse(text: &str) -> Result<Option<Command>, ChannelError> {
        let mut chars = text.chars();
        let tag = match chars.next() {
            Some(tag) => tag,
            None => return Ok(None),
        };

        let mut rest = chars.as_str();
        if tag == 's' {
            rest = rest.trim_end();
        }
        if rest.is_empty() {
            return Ok(Some(Command::from_parts(tag, None)?));
        }

        let payload = encode_text(rest)?;
        return Ok(Some(Command::from_parts(tag, Some(&payload))?));
    }

    pub fn payload_len(&self) -> usize {
        return self.payload.as_ref().map(|e| return e.len()).unwrap_or(0);
    }

    pub fn validate(&self) -> Result<(), ChannelError> {
        let payload_len = self.payload_len();
        if payload_len > MAX_PAYLOAD_LEN {
            return Err(ChannelError::InvalidPayload(format!(
                "payload is {payload_len} bytes, the limit is {MAX_PAYLOAD_LEN}"
            )));
        }

        if self.tag == CommandTag::Start && payload_len > 0 {
            return Err(ChannelError::InvalidPayload(
                "the 's' command does not take a payload".to_string(),
            ));
        }

        return Ok(());
    }

    /// Wire bytes: the tag followed by the raw payload. No terminator, no
    /// length prefix.
    pub fn encode(&self) -> Result<Vec<u8>, ChannelError> {
        self.validate()?;

        let mut bytes = Vec::with_capacity(1 + self.payload_len());
        bytes.push(self.tag.as_byte());
        if let Some(payload) = &self.payload {
            bytes.extend_from_slice(payload);
        }

        return Ok(bytes);
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        if let Some(payload) = &self.payload {
            for byte in payload {
                match byte {
                    b'\\' => write!(f, "\\\\")?,
                    0x20..=0x7e => write!(f, "{}", *byte as char)?,
                    _ => write!(f, "\\x{byte:02x}")?,
                }
            }
        }

        return Ok(());
    }
}

/// Encodes payload text with one byte per character (Latin-1), expanding
/// `\xNN` and `\\` escapes.
pub fn encode_text(text: &str) -> Result<Vec<u8>, ChannelError> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\\') => bytes.push(b'\\'),
                Some('x') => {
                    let hex = chars.by_ref().take(2).collect::<String>();
                    if hex.len() != 2 {
                        return Err(ChannelError::InvalidPayload(format!(
                            "incomplete escape '\\x{hex}'"
                        )));
                    }
                    let byte = u8::from_str_radix(&hex, 16).map_err(|_| {
                        return ChannelError::InvalidPayload(format!(
                            "invalid escape '\\x{hex}'"
                        ));
                    })?;
                    bytes.push(byte);
                }
                Some(other) => {
                    return Err(ChannelError::InvalidPayload(format!(
                        "unsupported escape '\\{other}'"
                    )));
                }
                None => {
                    return Err(ChannelError::InvalidPayload(
                        "payload ends with a lone backslash".to_string(),
                    ));
                }
            }
            continue;
        }

        let code = c as u32;
        if code > 0xff {
            return Err(ChannelError::InvalidPayload(format!(
                "'{c}' cannot be encoded as a single byte"
            )));
        }
        bytes.push(code as u8);
    }

    return Ok(bytes);
}
