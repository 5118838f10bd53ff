#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::SerialChannel;
use crate::domain::models::Action;
use crate::domain::models::ChannelError;
use crate::domain::models::Event;
use crate::domain::models::Message;

fn channel_error(err: ChannelError, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::ChannelMessage(Message::error(&err.to_string())))?;
    return Ok(());
}

/// Applies one action to the channel and reports the outcome as events.
pub fn handle_action(
    channel: &mut SerialChannel,
    action: Action,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match action {
        Action::ChannelConnect(port) => match channel.connect(&port) {
            Ok(()) => tx.send(Event::ChannelConnected(port))?,
            Err(err) => channel_error(err, tx)?,
        },
        Action::ChannelDisconnect() => {
            channel.close();
            tx.send(Event::ChannelDisconnected())?;
        }
        Action::ChannelSend(command) => match channel.send_command(&command) {
            Ok(written) => tx.send(Event::ChannelSent(command, written))?,
            Err(err) => channel_error(err, tx)?,
        },
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Owns the serial channel for the lifetime of the app. Serial writes
    /// block, so this runs on a blocking thread and returns once every
    /// action sender is dropped.
    pub fn start(
        mut channel: SerialChannel,
        tx: mpsc::UnboundedSender<Event>,
        mut rx: mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.blocking_recv() {
            handle_action(&mut channel, action, &tx)?;
        }

        channel.close();
        return Ok(());
    }
}
