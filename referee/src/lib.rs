mod config;
mod game;
mod recording;
mod session;
mod store;
pub use config::*;
pub use game::*;
pub use recording::*;
pub use session::*;
pub use store::*;
