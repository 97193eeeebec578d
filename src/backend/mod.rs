//! Backend module - execution and rendering

pub mod exec;
pub mod render;
pub mod value;

pub use exec::{Executor, Outcome};
pub use render::{render, OutputMode};
pub use value::Value;
