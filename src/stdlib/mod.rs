//! Standard library - built-in commands

pub mod builtins;
