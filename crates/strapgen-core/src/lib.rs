pub mod config;
pub mod error;
pub mod generate;
pub mod io;
pub mod jsobj;
pub mod patch;
pub mod paths;
pub mod project;
pub mod request;
pub mod template;
pub mod types;

pub use error::{GenError, Result};
