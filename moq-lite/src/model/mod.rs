mod broadcast;
mod group;
mod origin;
mod produce;
mod track;

pub use broadcast::*;
pub use group::*;
pub use origin::*;
pub use produce::*;
pub use track::*;
