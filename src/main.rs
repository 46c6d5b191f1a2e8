use clap::Parser;
use formpilot::cli::commands::{cmd_chat, cmd_fill, cmd_scan};
use formpilot::cli::config::{Cli, Commands, load_config, resolve_settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    let settings = resolve_settings(&cli, &config);

    match &cli.command {
        Commands::Scan { url, json } => {
            cmd_scan(url, *json, &settings)?;
        }
        Commands::Fill { url, context } => {
            let applied_any = cmd_fill(url, context.as_deref(), &settings)?;
            if !applied_any {
                std::process::exit(1);
            }
        }
        Commands::Chat { url } => {
            cmd_chat(url, &settings)?;
        }
    }

    Ok(())
}
