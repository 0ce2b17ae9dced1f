//! Geometric reasoning and tactics on top of the `tactica-core` data model.

pub mod bank_shot;
mod formation;
pub mod frame;
pub mod intercept;
pub mod obstruction;
pub mod passing;
mod policy;
pub mod situation;
mod strategy;

pub use formation::{formation, FormationDef};
pub use policy::{decide, find_shot, goal_corners, keeper_anchor};
pub use strategy::{ParseDefError, StrategyDef};
