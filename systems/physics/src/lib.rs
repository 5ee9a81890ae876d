#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-synchronous entity physics for the player and the patrolling enemies.
//!
//! Every entity is a unit hitbox with a continuous position. Movement is
//! resolved against the [`LevelStore`](platformer_world::LevelStore)
//! collision probes one axis at a time, and gameplay outcomes are reported
//! as [`Event`](platformer_core::Event) values pushed into a caller-provided
//! buffer.

mod countdown;
mod enemy;
mod player;

pub use countdown::Countdown;
pub use enemy::{Enemy, EnemyRoster};
pub use player::Player;
