//! # Ingestion Service
//!
//! Implements the "import a tool report" use case.
//!
//! Records coming out of an [`OutputParser`] are pushed into an
//! [`AssetRegistry`]: one host per address, and one interface on that host
//! carrying the hostname candidates. The registry owns deduplication, so
//! importing the same report twice changes nothing.

use ingestr_common::record::DiscoveryRecord;
use ingestr_common::registry::{AssetRegistry, HostId, InterfaceId, RegistryError};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::parser::{OutputParser, ParseFailure};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),
    #[error("registry rejected a record: {0}")]
    Registry(#[from] RegistryError),
}

/// One raw report and where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(source: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: source.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedRecord {
    pub address: String,
    pub host: HostId,
    pub interface: InterfaceId,
}

/// Registry identifiers for every record of one report, in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub records: Vec<IngestedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub source: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Reports that parsed, paired with their source, in input order.
    pub ingested: Vec<(String, IngestReport)>,
    pub skipped: Vec<SkippedDocument>,
}

impl BatchReport {
    pub fn record_count(&self) -> usize {
        self.ingested.iter().map(|(_, report)| report.records.len()).sum()
    }
}

/// Application service feeding parsed reports into a registry.
pub struct IngestionService<R: AssetRegistry> {
    registry: R,
}

impl<R: AssetRegistry> IngestionService<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Parses and imports a single report.
    pub fn ingest(&mut self, parser: &dyn OutputParser, raw: &[u8]) -> Result<IngestReport, IngestError> {
        let records = parser.parse(raw)?;
        Ok(self.feed(records)?)
    }

    /// Imports every document, skipping the ones that fail to parse.
    ///
    /// Parsing runs in parallel. Registry writes happen afterwards on the
    /// calling thread, in input order.
    pub fn ingest_batch(
        &mut self,
        parser: &dyn OutputParser,
        documents: &[Document],
    ) -> Result<BatchReport, RegistryError> {
        let parsed: Vec<Result<Vec<DiscoveryRecord>, ParseFailure>> = documents
            .par_iter()
            .map(|doc| parser.parse(&doc.bytes).map(Iterator::collect))
            .collect();

        let mut batch = BatchReport::default();
        for (doc, result) in documents.iter().zip(parsed) {
            match result {
                Ok(records) => {
                    let report = self.feed(records)?;
                    info!("{}: imported {} records", doc.source, report.records.len());
                    batch.ingested.push((doc.source.clone(), report));
                }
                Err(err) => {
                    warn!("{}: skipped by {} ({err})", doc.source, parser.name());
                    batch.skipped.push(SkippedDocument {
                        source: doc.source.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(batch)
    }

    fn feed(
        &mut self,
        records: impl IntoIterator<Item = DiscoveryRecord>,
    ) -> Result<IngestReport, RegistryError> {
        let mut report = IngestReport::default();
        for record in records {
            let host = self.registry.ensure_host(record.address())?;
            let interface = self.registry.ensure_interface(
                host,
                record.address(),
                &record.hostname_candidates(),
            )?;
            report.records.push(IngestedRecord {
                address: record.address().to_string(),
                host,
                interface,
            });
        }
        Ok(report)
    }
}
