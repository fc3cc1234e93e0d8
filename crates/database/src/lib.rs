//! # Database Crate
//!
//! The record store of the system: where OHLCV observations are kept between requests and
//! where the signal engine reads its history from.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate encapsulates all storage-specific logic behind the
//!   `ObservationStore` trait. Callers hold an `Arc<dyn ObservationStore>` and never see SQL.
//! - **Asynchronous & Pooled:** The PostgreSQL store uses a connection pool (`PgPool`)
//!   with an acquire timeout; the in-memory store guards its rows with an async `RwLock`.
//! - **Validated on Entry:** Every store validates records before accepting them.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: Establish the pool and bring the schema up to date.
//! - `ObservationStore`: The store interface (`list_all`, `insert`, `insert_many`, `clear`).
//! - `DbRepository`: The PostgreSQL implementation over the `stock_data` table.
//! - `InMemoryStore`: A process-local implementation for offline runs and tests.
//! - `loader`: CSV parsing and chunked bulk loading.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod loader;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use loader::{bulk_load, read_csv, read_csv_file, LoadReport, DEFAULT_CHUNK_SIZE};
pub use memory::InMemoryStore;
pub use repository::DbRepository;
pub use store::ObservationStore;
