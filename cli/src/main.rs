mod commands;
mod terminal;

use commands::{CommandLine, Commands, parse, plugins, rewrite};
use ingestr_common::config::{Config, OutputSettings, QueryCapabilities};
use ingestr_plugins::PluginManager;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.quiet);

    let cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
        query: if commands.no_native_predicates {
            QueryCapabilities::fallback()
        } else {
            QueryCapabilities::detect()
        },
        output: OutputSettings::new(
            commands.data_dir.unwrap_or_else(std::env::temp_dir),
            rand::random::<u32>(),
        ),
    };

    print::banner(cfg.no_banner, cfg.quiet);
    let manager = PluginManager::with_defaults(&cfg.output, cfg.query)?;

    match commands.command {
        Commands::Parse { plugin, files } => {
            print::header("importing reports", cfg.quiet);
            parse::parse(&manager, &plugin, &files, &cfg)
        }
        Commands::Rewrite { command } => rewrite::rewrite(&manager, &command, &cfg),
        Commands::Plugins => {
            print::header("available plugins", cfg.quiet);
            plugins::list(&manager, &cfg);
            Ok(())
        }
    }
}
