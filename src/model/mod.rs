pub mod config;
pub mod palette;
pub mod song;
