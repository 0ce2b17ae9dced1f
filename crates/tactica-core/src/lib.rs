mod command;
mod geom;
mod player_id;
mod roles;
mod settings;
mod world;

pub use command::*;
pub use geom::*;
pub use player_id::*;
pub use roles::*;
pub use settings::*;
pub use world::*;
