//! 分页、渲染与显示

pub mod display_utils;
pub mod document;
pub mod pagination;
pub mod render;
pub mod terminal;
