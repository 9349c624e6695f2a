mod color;
mod indicator;
mod item;
mod progress;
pub mod render;
mod session;
mod stats;

pub use color::*;
pub use indicator::*;
pub use item::*;
pub use progress::*;
pub use render::{RenderMode, Renderer};
pub use session::*;
pub use stats::*;
