use anyhow::Context;
use ingestr_common::config::Config;
use ingestr_plugins::PluginManager;

use crate::terminal::print;

pub fn rewrite(manager: &PluginManager, command: &str, cfg: &Config) -> anyhow::Result<()> {
    let plugin = manager
        .select_for_command(command)
        .with_context(|| format!("no plugin recognises the command '{command}'"))?;

    if cfg.quiet == 0 {
        print::aligned_line("Plugin", plugin.name(), 6);
        print::aligned_line("Report", plugin.output_path().display(), 6);
    }
    print::print(&plugin.rewrite_command(command));
    Ok(())
}
