//! # Shared Domain Models
//!
//! Types every `ingestr` crate agrees on. Nothing in here performs IO.
//!
//! * [`record`]: the normalized [`record::DiscoveryRecord`] every tool adapter produces.
//! * [`registry`]: the outbound port the ingestion pipeline feeds.
//! * [`filter`]: owner-scoped saved search filters.
//! * [`config`]: runtime configuration threaded through the pipeline.

pub mod config;
pub mod filter;
pub mod log;
pub mod record;
pub mod registry;
