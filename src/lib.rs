mod entry;
mod error;
pub mod arena;
pub mod codec;
pub mod comparator;
pub mod red_black_tree;

pub use crate::error::{Error, Result, Violation};
