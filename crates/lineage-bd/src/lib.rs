//! # lineage-bd
//!
//! Reference storage for family trees.
//!
//! This crate provides:
//! - `IndividualRecord` and `FamilyRecord` (the on-disk records)
//! - JSONL reading with line-numbered parse errors and corruption checks
//! - `MemoryStore`, which implements the kernel's `FamilyStore`
//!
//! ## Data model
//!
//! ```text
//! JSONL (on disk, one line per individual or family)
//!     │  load
//! MemoryStore (BTreeMap-indexed, last-write-wins)
//!     │  FamilyStore
//! lineage-kernel
//! ```

pub mod jsonl;
pub mod memory;
pub mod record;

pub use jsonl::{JsonlError, read_records, read_records_from_path};
pub use memory::{MemoryStore, MemoryStoreError};
pub use record::{FamilyRecord, IndividualRecord, Record};
