//! Core data types for the rate watch bot.

pub mod pair;
pub mod sample;
pub mod subscriber;

pub use pair::*;
pub use sample::*;
pub use subscriber::*;
