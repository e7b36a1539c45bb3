pub mod finder;
pub mod types;

pub use finder::AspectFinder;
pub use types::{AspectKind, AspectMatch, OrbTable};
