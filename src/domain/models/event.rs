use tui_textarea::Input;

use super::Command;
use super::Message;

pub enum Event {
    ChannelConnected(String),
    ChannelDisconnected(),
    ChannelMessage(Message),
    ChannelSent(Command, usize),
    KeyboardAltDown(),
    KeyboardAltUp(),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLW(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
