//src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

// Funções puras do ciclo de vida do contrato, usadas direto pela camada de apresentação.
pub use services::contract_service::{classify_contract_status, compute_contract_progress};
pub use services::timeline_service::sort_lifecycle_events;
