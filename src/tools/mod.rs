//! 外部协作工具：算术求值器

pub mod calculator;

pub use calculator::{evaluate, try_evaluate, CalcError};
