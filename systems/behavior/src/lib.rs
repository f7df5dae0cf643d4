#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Decision logic for the player character and the enemy bots.
//!
//! Both behaviours implement [`skirmish_world::Behavior`]. They only set the
//! activity and facing of their actor and strike other entities; the world
//! turns a walking activity into motion after the behaviour returns.

mod bot;
mod player;

pub use bot::BotAi;
pub use player::{InputHandle, PlayerController};
