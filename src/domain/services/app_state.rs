#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::ConsoleLog;
use super::Scroll;
use super::WateringSession;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Command;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- s - Start a transmission on the board.
- a[PAYLOAD] - Send data to the board's input FIFO. Use \xNN for raw bytes and \\ for a backslash, up to 1024 bytes.
- /connect (/c) PORT - Connect to a serial port, such as /dev/ttyUSB0 or COM3.
- /disconnect (/d) - Close the serial port.
- /threshold (/t) PERCENT - Set the watering threshold, 0 to 100.
- /interval (/i) MINUTES - Set the measurement interval.
- /toggle (/w) - Toggle watering on or off and send the new state to the board.
- /start (/s) - Same as sending `s`.
- /sample MINUTES PERCENT - Record a moisture reading by hand.
- /save - Save this session.
- /quit /exit (/q) - Exit Waterline.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+W - Toggle watering
- ALT+Up / ALT+Down - Raise or lower the threshold by 5%
- CTRL+C - Exit
        "#;

    return text.trim().to_string();
}

pub struct AppState {
    pub connected_port: Option<String>,
    pub console: ConsoleLog,
    pub input_rejected: bool,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub save_requested: bool,
    pub scroll: Scroll,
    pub session: WateringSession,
    pub session_id: String,
}

impl AppState {
    pub fn new(session_id: &str, session: WateringSession) -> AppState {
        let mut app_state = AppState {
            connected_port: None,
            console: ConsoleLog::default(),
            input_rejected: false,
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            save_requested: false,
            scroll: Scroll::default(),
            session,
            session_id: session_id.to_string(),
        };

        let mut greeting = "Waterline is ready. Connect to the board with `/connect PORT`, or run `/help` to see all commands.".to_string();
        if !app_state.session.samples().is_empty() {
            greeting = format!(
                "Restored session {session_id} with {} reading(s).\n\n{greeting}",
                app_state.session.samples().len()
            );
        }
        app_state.add_message(Message::new(Author::Waterline, &greeting));

        return app_state;
    }

    fn info(&mut self, text: &str) {
        self.add_message(Message::new(Author::Waterline, text));
    }

    fn reject(&mut self, text: &str) {
        self.input_rejected = true;
        self.add_message(Message::error(text));
    }

    /// Handles one submitted line from the console. Returns true when the
    /// operator asked to quit.
    pub fn handle_input(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if input.trim().is_empty() {
            return Ok(false);
        }

        self.input_rejected = false;
        self.add_message(Message::new(Author::Operator, input));

        if let Some(command) = SlashCommand::parse(input) {
            return self.handle_slash_command(command, tx);
        }

        if input.starts_with('/') {
            let name = input.split_whitespace().next().unwrap_or(input);
            self.reject(&format!(
                "Unknown command {name}. Run `/help` to see all commands."
            ));
            return Ok(false);
        }

        match Command::parse(input) {
            Ok(Some(command)) => tx.send(Action::ChannelSend(command))?,
            Ok(None) => (),
            Err(err) => self.reject(&err.to_string()),
        }

        return Ok(false);
    }

    fn handle_slash_command(
        &mut self,
        command: SlashCommand,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        if command.is_quit() {
            return Ok(true);
        }

        if command.is_help() {
            self.info(&help_text());
        } else if command.is_connect() {
            match command.args.first() {
                Some(port) => tx.send(Action::ChannelConnect(port.to_string()))?,
                None => self.reject("You must specify a port with `/connect PORT`."),
            }
        } else if command.is_disconnect() {
            tx.send(Action::ChannelDisconnect())?;
        } else if command.is_start() {
            tx.send(Action::ChannelSend(Command::start()))?;
        } else if command.is_toggle() {
            self.toggle_watering(tx)?;
        } else if command.is_threshold() {
            self.set_threshold(&command.args);
        } else if command.is_interval() {
            self.set_interval(&command.args);
        } else if command.is_sample() {
            self.record_sample(&command.args);
        } else if command.is_save() {
            self.save_requested = true;
        }

        return Ok(false);
    }

    fn set_threshold(&mut self, args: &[String]) {
        let value = match args.first().map(|e| return e.parse::<i64>()) {
            Some(Ok(value)) => value,
            _ => {
                self.reject("You must specify a whole percentage with `/threshold PERCENT`.");
                return;
            }
        };

        match self.session.set_threshold(value) {
            Ok(()) => self.info(&format!("Threshold set to {value}%.")),
            Err(err) => self.reject(&err.to_string()),
        }
    }

    fn set_interval(&mut self, args: &[String]) {
        let value = match args.first().map(|e| return e.parse::<f64>()) {
            Some(Ok(value)) => value,
            _ => {
                self.reject("You must specify a number of minutes with `/interval MINUTES`.");
                return;
            }
        };

        match self.session.set_interval(value) {
            Ok(()) => self.info(&format!("Measurement interval set to {value} min.")),
            Err(err) => self.reject(&err.to_string()),
        }
    }

    fn record_sample(&mut self, args: &[String]) {
        let parsed = args
            .iter()
            .map(|e| return e.parse::<f64>())
            .collect::<Result<Vec<f64>, _>>();

        let (time, percentage) = match parsed.as_deref() {
            Ok([time, percentage]) => (*time, *percentage),
            _ => {
                self.reject("You must specify a reading with `/sample MINUTES PERCENT`.");
                return;
            }
        };

        match self.session.record_sample(time, percentage) {
            Ok(()) => self.info(&format!("Recorded {percentage}% at {time} min.")),
            Err(err) => self.reject(&err.to_string()),
        }
    }

    /// Flips the watering flag and asks the channel to transmit the new state.
    pub fn toggle_watering(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let on = self.session.toggle_watering();
        let state = if on { "ON" } else { "OFF" };
        self.info(&format!("Watering override {state}."));
        tx.send(Action::ChannelSend(Command::watering_state(on)))?;

        return Ok(());
    }

    pub fn adjust_threshold(&mut self, delta: i64) {
        self.session.adjust_threshold(delta);
    }

    pub fn handle_channel_event(&mut self, event: Event) {
        match event {
            Event::ChannelConnected(port) => {
                self.info(&format!("Connected to {port}."));
                self.connected_port = Some(port);
            }
            Event::ChannelDisconnected() => {
                if let Some(port) = self.connected_port.take() {
                    self.info(&format!("Disconnected from {port}."));
                }
            }
            Event::ChannelSent(command, written) => {
                let expected = command.payload_len() + 1;
                if written < expected {
                    self.add_message(Message::error(&format!(
                        "Only {written} of {expected} bytes of {command} reached the board."
                    )));
                } else {
                    self.info(&format!("Sent {command} ({written} bytes)."));
                }
            }
            Event::ChannelMessage(message) => {
                if message.message_type() == MessageType::Error {
                    self.input_rejected = true;
                }
                self.add_message(message);
            }
            _ => (),
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.console
            .set_messages(&self.messages, self.last_known_width);

        // Borders take a row above and below.
        self.scroll.set_state(
            self.console.len() as u16,
            self.last_known_height.saturating_sub(2),
        );
    }
}
