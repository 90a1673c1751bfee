// src/common.rs

pub mod error;
pub mod pagination;
pub mod time_window;
