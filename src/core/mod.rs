//! 核心逻辑

pub mod input;
pub mod navigation;
pub mod posts;
pub mod viewer;
