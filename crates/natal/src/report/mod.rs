pub mod locale;
pub mod renderer;

pub use locale::Variant;
pub use renderer::{aspect_summary, render};
