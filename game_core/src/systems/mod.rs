pub mod collision;
pub mod movement;
pub mod pickups;
pub mod spin;

pub use collision::*;
pub use movement::*;
pub use pickups::*;
pub use spin::*;
