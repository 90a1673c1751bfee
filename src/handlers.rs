// src/handlers.rs

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod profiles;
pub mod targets;
