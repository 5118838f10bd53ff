use super::Command;

/// Requests sent from the UI to the worker owning the serial channel.
pub enum Action {
    ChannelConnect(String),
    ChannelDisconnect(),
    ChannelSend(Command),
}
