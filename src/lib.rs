#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
pub mod combat;
mod common;
mod config;
mod fleet;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod player;
mod vessel;

pub use ai::{best_maneuver, execute_plan, plan_turn, score_pose, Action, Maneuver, Plan};
pub use combat::{fire_at, fire_broadside, side_fire_zones, targets_in_range, BroadsideHit, Shot, Target};
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use player::{AiPlayer, CliPlayer, Player};
pub use vessel::*;
