// src/services.rs

// Regras puras (sem I/O)
pub mod aggregation;
pub mod progress;

pub mod session;
pub mod poller;

pub mod auth;
pub mod profile_service;
pub mod order_service;
pub mod target_service;
pub mod dashboard_service;
pub mod inventory_service;
