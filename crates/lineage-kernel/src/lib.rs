//! # Lineage Kernel
//!
//! Descendant numbering for genealogical trees: given one ancestor and a
//! numbering style, label every descendant (and, for some styles, every
//! spouse) with a string such as `1.2.3`, `123.` or `1 4ii`.
//!
//! This crate is **store-agnostic**: individuals and families reach it
//! only through [`FamilyStore`]. Missing data never aborts a run; it shows
//! up as synthetic entries in the [`LabelingResult`].
//!
//! ## Architecture
//!
//! ```text
//! StyleRegistry                 ← identifier → factory, optional TOML manifest
//!     │ configure(id, raw)
//! NumberingStyle                ← descriptors, typed setters, label rules
//!     │
//! DescendantNumberGenerator     ← pre-order walk over a FamilyStore
//!     │ generate()
//! LabelingResult                ← ordered key → { name?, label }
//!     │
//! export                        ← JSON payload, delimited and aligned tables
//! ```

pub mod error;
pub mod export;
pub mod family;
pub mod generator;
pub mod labeling;
pub mod parameter;
pub mod params;
pub mod registry;
pub mod style;
pub mod styles;

pub use error::{LineageError, StoreError, StyleError};
pub use export::{DelimitedOptions, LabelingExport};
pub use family::{DatePrecision, FamilyStore, Person, PersonId, SortDate, Union, UnionId};
pub use generator::DescendantNumberGenerator;
pub use labeling::{EntryKind, LabelEntry, LabelingResult, ResultKey};
pub use parameter::{Choice, ParameterDescriptor, ParameterKind, ParameterValue};
pub use params::NumberingParameters;
pub use registry::{BUILTIN_STYLES, StyleFactory, StyleRegistry};
pub use style::NumberingStyle;
