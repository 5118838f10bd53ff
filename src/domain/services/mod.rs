pub mod actions;
mod app_state;
mod channel;
mod console;
pub mod events;
mod plot;
mod scroll;
mod sessions;
mod watering;

pub use app_state::*;
pub use channel::*;
pub use console::*;
pub use plot::*;
pub use scroll::*;
pub use sessions::*;
pub use watering::*;
