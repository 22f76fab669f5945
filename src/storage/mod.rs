//! HydroMonitor Storage
//!
//! This module provides the reading model and the server-side store:
//!
//! - **types**: Core data structures (Reading, ReadingId, Metric)
//! - **engine**: Append-only reading store with an optional JSON snapshot
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use hydromonitor::storage::{Reading, ReadingId, ReadingStore, StorageConfig, now_timestamp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ReadingStore::open(&StorageConfig::new("./data")).await?;
//!
//!     let reading = Reading::new(ReadingId::generate(), now_timestamp(), 22.0, 6.2, 950.0)
//!         .humidity(60.0)
//!         .dissolved_oxy(6.5);
//!     store.append(vec![reading]).await?;
//!
//!     println!("{} readings stored", store.len().await);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{ReadingStore, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use types::{now_timestamp, parse_timestamp, Metric, Reading, ReadingId};
