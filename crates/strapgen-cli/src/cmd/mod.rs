pub mod apis;
pub mod events;
pub mod generate;
