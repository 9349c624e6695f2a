mod client;
mod heal_types;

pub use client::*;
pub use heal_types::*;
