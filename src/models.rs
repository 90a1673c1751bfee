// src/models.rs

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod order;
pub mod profile;
pub mod target;
