//! Middle module - infix to postfix reordering

pub mod reorder;

pub use reorder::reorder;
