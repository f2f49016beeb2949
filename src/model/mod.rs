mod branch;
mod college;
mod common;
mod leaderboard;
mod stats;
mod user;

pub use branch::*;
pub use college::*;
pub use common::*;
pub use leaderboard::*;
pub use stats::*;
pub use user::*;
