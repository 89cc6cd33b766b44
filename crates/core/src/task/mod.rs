//! Task module
//!
//! This module contains the task model and its persistent storage.

pub mod database;
mod model;
mod repository;
mod store;

pub use database::{Database, IndexKey, DB_VERSION};
pub use model::*;
pub use repository::TaskRepository;
pub use store::TaskStore;
