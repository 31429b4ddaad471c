//! # Hostel Catalog
//!
//! Read-only snapshot types for hostel listings and the store collaborator
//! that produces them.
//!
//! ```text
//! hosted table / JSON file
//!     │
//!     ├──> HostelRow[]   (flat wire shape, every column optional)
//!     │
//!     └──> CatalogRecord[]  (owned RoomOffering children)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use hostel_catalog::{JsonFileStore, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = JsonFileStore::new("data/hostels.json");
//!     for record in store.fetch_all_records().await? {
//!         println!("{}: {} rooms", record.name, record.rooms.len());
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod rest;
mod row;
mod store;
mod types;

pub use error::{CatalogError, Result};
pub use rest::{RestStore, RestStoreConfig};
pub use row::{decode_rows, HostelRow, RoomRow};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
pub use types::{
    AcType, CatalogRecord, Gender, Pricing, RecordId, RoomOffering, Warden, WashroomType,
};
