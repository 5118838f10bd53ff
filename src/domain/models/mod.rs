mod action;
mod author;
mod command;
mod command_input;
mod connection;
mod errors;
mod event;
mod message;
mod slash_commands;

pub use action::*;
pub use author::*;
pub use command::*;
pub use command_input::*;
pub use connection::*;
pub use errors::*;
pub use event::*;
pub use message::*;
pub use slash_commands::*;
