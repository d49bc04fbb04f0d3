//! # Output Parsers
//!
//! The contract every tool adapter implements: raw report in, lazy stream
//! of [`DiscoveryRecord`]s out.
//!
//! A report that cannot be parsed is an `Err`, not a panic. Callers that
//! process batches use [`OutputParser::parse_or_empty`] (or the ingestion
//! service) so one corrupt report never aborts the others.

use std::fmt;

use ingestr_common::record::DiscoveryRecord;
use thiserror::Error;
use tracing::{debug, warn};

use crate::xml::{Element, NodeQuery, ParseTree, QueryEngine, TreeError};

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("malformed report: {0}")]
    Malformed(#[from] TreeError),
}

/// Core trait that all tool output parsers must implement.
pub trait OutputParser: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Parses one complete report.
    fn parse(&self, raw: &[u8]) -> Result<Records, ParseFailure>;

    /// Like [`OutputParser::parse`], but a malformed report is logged and yields nothing.
    fn parse_or_empty(&self, raw: &[u8]) -> Records {
        self.parse(raw).unwrap_or_else(|err| {
            warn!("{}: discarding report ({err})", self.name());
            Records::empty()
        })
    }
}

/// Single-pass stream of records produced by one [`OutputParser::parse`] call.
pub struct Records {
    inner: Box<dyn Iterator<Item = DiscoveryRecord> + Send>,
}

impl Records {
    pub fn new(inner: impl Iterator<Item = DiscoveryRecord> + Send + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Iterator for Records {
    type Item = DiscoveryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl fmt::Debug for Records {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records").finish_non_exhaustive()
    }
}

/// Where an entry's hostname comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostnameSource {
    /// Text of the matched subnode.
    Text(NodeQuery<'static>),
    /// Attribute of the matched subnode.
    Attribute(NodeQuery<'static>, &'static str),
}

/// The fixed path from a document to its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSchema {
    /// Tag of the results container, a direct child of the root (or the root itself).
    pub container: &'static str,
    /// Tag of each entry directly under the container. Its own text is the address.
    pub entry: &'static str,
    pub hostname: HostnameSource,
}

/// Schema-driven parser for XML reports.
#[derive(Debug, Clone)]
pub struct XmlRecordParser {
    name: String,
    schema: ExtractionSchema,
    engine: QueryEngine,
}

impl XmlRecordParser {
    pub fn new(name: impl Into<String>, schema: ExtractionSchema, engine: QueryEngine) -> Self {
        Self {
            name: name.into(),
            schema,
            engine,
        }
    }
}

impl OutputParser for XmlRecordParser {
    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, raw: &[u8]) -> Result<Records, ParseFailure> {
        let root = ParseTree::parse(raw)?.into_root();

        let container = if root.name() == self.schema.container {
            Some(root)
        } else {
            root.into_children()
                .into_iter()
                .find(|child| child.name() == self.schema.container)
        };

        let Some(container) = container else {
            debug!(
                "{}: no <{}> container, report holds no records",
                self.name, self.schema.container
            );
            return Ok(Records::empty());
        };

        let schema = self.schema;
        let engine = self.engine;
        let parser = self.name.clone();
        let entries = container
            .into_children()
            .into_iter()
            .filter(move |child| child.name() == schema.entry)
            .filter_map(move |entry| {
                let record = extract(&engine, &schema, &entry);
                if record.is_none() {
                    warn!("{parser}: skipping <{}> entry without an address", schema.entry);
                }
                record
            });

        Ok(Records::new(entries))
    }
}

fn extract(engine: &QueryEngine, schema: &ExtractionSchema, entry: &Element) -> Option<DiscoveryRecord> {
    let hostname = match &schema.hostname {
        HostnameSource::Text(query) => engine.text_from_subnode(entry, query),
        HostnameSource::Attribute(query, attr) => engine.attr_from_subnode(entry, query, attr),
    };
    let record = DiscoveryRecord::new(entry.text(), hostname)?;
    debug!(address = record.address(), hostname = ?record.hostname(), "extracted record");
    Some(record)
}
