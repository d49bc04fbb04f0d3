use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use ingestr_common::{config::Config, success};
use ingestr_core::ingest::{BatchReport, Document, IngestionService};
use ingestr_core::registry::{HostEntry, InMemoryRegistry};
use ingestr_plugins::PluginManager;
use tracing::warn;

use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

pub fn parse(
    manager: &PluginManager,
    plugin_id: &str,
    files: &[PathBuf],
    cfg: &Config,
) -> anyhow::Result<()> {
    let plugin = manager
        .get(plugin_id)
        .with_context(|| format!("no plugin named '{plugin_id}', see `ingestr plugins`"))?;

    let documents: Vec<Document> = read_documents(files);
    if documents.is_empty() {
        anyhow::bail!("none of the given report files could be read");
    }

    let start_time: Instant = Instant::now();
    let mut service = IngestionService::new(InMemoryRegistry::new());
    let batch: BatchReport = {
        let _spinner = spinner::start(format!(
            "Parsing {} reports with {}...",
            documents.len(),
            plugin.name()
        ));
        service
            .ingest_batch(plugin.parser(), &documents)
            .context("feeding records into the registry")?
    };

    import_ends(&service.into_registry(), &batch, start_time.elapsed(), cfg);
    Ok(())
}

fn read_documents(files: &[PathBuf]) -> Vec<Document> {
    files
        .iter()
        .filter_map(|path| match std::fs::read(path) {
            Ok(bytes) => Some(Document::new(path.display().to_string(), bytes)),
            Err(err) => {
                warn!("{}: {err}", path.display());
                None
            }
        })
        .collect()
}

fn import_ends(registry: &InMemoryRegistry, batch: &BatchReport, total_time: Duration, cfg: &Config) {
    if registry.hosts().is_empty() {
        print::header("nothing imported", cfg.quiet);
        if lists_hosts(cfg.quiet) {
            print::no_results();
        }
        print_summary(registry, batch, total_time, cfg);
        return;
    }

    print::header("imported hosts", cfg.quiet);
    if lists_hosts(cfg.quiet) {
        print_hosts(registry);
    }
    print_summary(registry, batch, total_time, cfg);
}

/// At `-qq` and above only the summary is printed.
fn lists_hosts(quiet: u8) -> bool {
    quiet < 2
}

fn print_hosts(registry: &InMemoryRegistry) {
    let hosts: &[HostEntry] = registry.hosts();
    for (idx, host) in hosts.iter().enumerate() {
        print::tree_head(idx, &host.address);
        let details: Vec<format::Detail> = registry
            .interfaces_of(host.id)
            .flat_map(format::interface_to_details)
            .collect();
        print::as_tree_one_level(details);
        if idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn print_summary(registry: &InMemoryRegistry, batch: &BatchReport, total_time: Duration, cfg: &Config) {
    let hosts: ColoredString = format!("{} hosts", registry.host_count()).bold().green();
    let interfaces: ColoredString = format!("{} interfaces", registry.interface_count()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!(
        "Import Complete: {hosts} and {interfaces} from {} records in {total_time}",
        batch.record_count()
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => success!("{}", output),
    }

    if !batch.skipped.is_empty() {
        warn!(
            "{} of {} reports were malformed and skipped",
            batch.skipped.len(),
            batch.skipped.len() + batch.ingested.len()
        );
    }
}
