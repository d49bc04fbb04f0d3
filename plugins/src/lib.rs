//! # Tool Plugins
//!
//! Every supported pentest tool is described by a [`ToolPlugin`]: how to
//! recognise its command line, how to make it write a machine readable
//! report, and which [`OutputParser`] turns that report into records.
//!
//! Supporting a new tool means adding a plugin and registering it in
//! [`PluginManager::with_defaults`]. Nothing else in the pipeline changes.

use std::path::Path;

use ingestr_common::config::{OutputSettings, QueryCapabilities};
use ingestr_core::parser::OutputParser;

pub mod command;
pub mod dnsenum;

pub use dnsenum::DnsenumPlugin;

/// Adapter between one external tool and the ingestion pipeline.
pub trait ToolPlugin: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn plugin_version(&self) -> &str;

    /// Version of the tool whose output format this plugin understands.
    fn tool_version(&self) -> &str;

    /// Whether `command` invokes this plugin's tool.
    fn matches_command(&self, command: &str) -> bool;

    /// Rewrites `command` so the tool writes its report to [`ToolPlugin::output_path`].
    fn rewrite_command(&self, command: &str) -> String;

    fn output_path(&self) -> &Path;

    fn parser(&self) -> &dyn OutputParser;
}

/// Lookup table for the registered plugins.
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn ToolPlugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager holding every built-in plugin.
    pub fn with_defaults(
        settings: &OutputSettings,
        capabilities: QueryCapabilities,
    ) -> anyhow::Result<Self> {
        let mut manager = Self::new();
        manager.register(DnsenumPlugin::new(settings, capabilities)?);
        Ok(manager)
    }

    pub fn register(&mut self, plugin: impl ToolPlugin + 'static) {
        self.plugins.push(Box::new(plugin));
    }

    /// Plugin with the given id, ignoring case.
    pub fn get(&self, id: &str) -> Option<&dyn ToolPlugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.id().eq_ignore_ascii_case(id))
            .map(|plugin| plugin.as_ref())
    }

    /// First registered plugin whose tool `command` invokes.
    pub fn select_for_command(&self, command: &str) -> Option<&dyn ToolPlugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.matches_command(command))
            .map(|plugin| plugin.as_ref())
    }

    pub fn plugins(&self) -> impl Iterator<Item = &dyn ToolPlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
