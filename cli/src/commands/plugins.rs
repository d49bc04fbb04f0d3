use colored::*;
use ingestr_common::config::Config;
use ingestr_plugins::PluginManager;

use crate::mprint;
use crate::terminal::{colors, print};

pub fn list(manager: &PluginManager, cfg: &Config) {
    for (idx, plugin) in manager.plugins().enumerate() {
        if cfg.quiet > 0 {
            print::print(plugin.id());
            continue;
        }
        print::tree_head(idx, plugin.name());
        print::as_tree_one_level(vec![
            ("Id".to_string(), plugin.id().color(colors::ACCENT)),
            ("Plugin".to_string(), plugin.plugin_version().normal()),
            ("Tool".to_string(), plugin.tool_version().normal()),
        ]);
        if idx + 1 != manager.len() {
            mprint!();
        }
    }
}
