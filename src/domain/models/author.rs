use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Author {
    /// Whoever is typing into the console.
    #[strum(serialize = "You")]
    Operator,
    Waterline,
}
