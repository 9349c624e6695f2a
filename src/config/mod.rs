mod config;
mod constants;
mod help;
pub mod monitor;

pub use config::*;
pub use constants::*;
pub use help::*;
