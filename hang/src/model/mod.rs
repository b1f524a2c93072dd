mod broadcast;
mod frame;
mod group;
mod location;
mod track;

pub use broadcast::*;
pub use frame::*;
pub use group::*;
pub use location::*;
pub use track::*;
