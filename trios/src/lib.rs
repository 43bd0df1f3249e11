pub use ai_player::*;
pub use board::*;
pub use cards::*;
pub use errors::*;
pub use game::*;
pub use player::*;
pub use protocol_types::*;
pub use strategy::*;
pub use visualization::*;

mod ai_player;
#[cfg(test)]
mod arbitrary;
mod board;
mod cards;
mod errors;
mod game;
mod player;
mod protocol_types;
mod strategy;
mod visualization;
