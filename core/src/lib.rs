//! # Ingestion Core
//!
//! Turns raw tool reports into registry entries.
//!
//! * [`xml`]: a small element tree plus typed node queries.
//! * [`parser`]: the [`parser::OutputParser`] contract and the schema-driven XML parser.
//! * [`ingest`]: feeds parsed records into an [`ingestr_common::registry::AssetRegistry`].
//! * [`registry`]: an in-memory registry implementation.
//! * [`filters`]: owner-scoped storage for saved search filters.

pub mod filters;
pub mod ingest;
pub mod parser;
pub mod registry;
pub mod xml;
