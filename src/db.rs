// src/db.rs

pub mod stores;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod target_repo;
pub use target_repo::TargetRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;

#[cfg(test)]
pub mod memory;

pub use stores::{CredentialStore, InventoryStore, OrderFilter, OrderStore, ProfileStore, TargetStore};
