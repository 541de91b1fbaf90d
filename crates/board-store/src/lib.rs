//! # board-store
//!
//! Document-store seam for opsboard.
//!
//! The dashboard treats its backing store the way the hosted product treats
//! the vendor database: named collections of schemaless documents, observed
//! through live whole-snapshot subscriptions and written through merges.
//! This crate owns that seam: the [`DocumentStore`] trait, the document and
//! snapshot types, and [`MemoryStore`], an in-memory implementation that
//! plays the vendor role in development and tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use board_store::{Collection, DocumentStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let mut sub = store.subscribe(Collection::Reports)?;
//!
//! // First `next` yields the current contents, then one whole snapshot
//! // per committed write. Dropping `sub` releases the listener.
//! while let Some(snapshot) = sub.next().await {
//!     println!("{} documents", snapshot.documents.len());
//! }
//! ```

mod collection;
mod document;
mod error;
mod store;

pub use collection::Collection;
pub use document::{Document, Fields, Snapshot};
pub use error::{Result, StoreError};
pub use store::{DocumentStore, MemoryStore, Subscription};
