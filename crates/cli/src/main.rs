use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use settings_protocol::{
    GlobalQueryHandler, Item, Launcher, ProcessLauncher, RankItem, RecordingLauncher,
    TriggerQuery, TriggerQueryHandler,
};
use settings_search::{Catalog, PluginConfig, SettingsPlugin, CONFIG_FILE_NAME};

use crate::response::CommandResponse;

mod response;

#[derive(Parser)]
#[command(name = "gnome-settings")]
#[command(about = "Open GNOME Settings pages from short queries", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Print a JSON envelope on stdout (implies --quiet)
    #[arg(long, global = true)]
    json: bool,

    /// Plugin config file (TOML); defaults to gnome_settings.toml next to the executable
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the trigger from the config file
    #[arg(long, global = true)]
    trigger: Option<String>,

    /// Override the icon path from the config file
    #[arg(long, global = true)]
    icon_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show plugin metadata, trigger and synopsis
    Metadata,

    /// List every settings page
    List,

    /// Triggered search: substring match over id, title and description
    Query(QueryArgs),

    /// Global search: a single word matching a page id exactly
    Global(QueryArgs),

    /// Open a settings page by id
    Open(OpenArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Query text; a leading trigger is stripped
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

#[derive(Args)]
struct OpenArgs {
    /// Page id, e.g. `display`
    page_id: String,

    /// Print the command instead of launching it
    #[arg(long)]
    dry_run: bool,
}

struct Output {
    data: Value,
    text: String,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    // stdout is reserved for JSON
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let json_output = cli.json;
    let result = run(cli);
    let failed = result.is_err();
    let emitted = match result {
        Ok(output) if json_output => print_json(&CommandResponse::ok(output.data)),
        Ok(output) => {
            if !output.text.is_empty() {
                println!("{}", output.text);
            }
            Ok(())
        }
        Err(err) if json_output => print_json(&CommandResponse::error(format!("{err:#}"))),
        Err(err) => {
            eprintln!("Error: {err:#}");
            Ok(())
        }
    };

    if let Err(err) = emitted {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_json(response: &CommandResponse) -> Result<()> {
    let body = serde_json::to_string_pretty(response).context("Failed to serialize response")?;
    println!("{body}");
    Ok(())
}

fn run(cli: Cli) -> Result<Output> {
    let install_dir = install_dir()?;
    let config = load_config(&cli, &install_dir)?;
    let catalog = Catalog::gnome().context("Built-in settings catalog is invalid")?;
    let plugin = SettingsPlugin::from_config(&catalog, &config, &install_dir);

    match cli.command {
        Commands::Metadata => run_metadata(&plugin),
        Commands::List => run_query(&plugin, ""),
        Commands::Query(args) => run_query(&plugin, &args.text.join(" ")),
        Commands::Global(args) => run_global(&plugin, &args.text.join(" ")),
        Commands::Open(args) => run_open(&plugin, &args.page_id, args.dry_run),
    }
}

fn load_config(cli: &Cli, install_dir: &Path) -> Result<PluginConfig> {
    let mut config = match &cli.config {
        Some(path) => PluginConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PluginConfig::load_or_default(&install_dir.join(CONFIG_FILE_NAME))
            .context("Failed to load config next to the executable")?,
    };
    if let Some(trigger) = &cli.trigger {
        config.trigger = trigger.clone();
    }
    if let Some(icon_path) = &cli.icon_path {
        config.icon_path = Some(icon_path.clone());
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Directory the plugin's assets are resolved against: the one holding the
/// running executable.
fn install_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate the running executable")?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}

fn run_metadata(plugin: &SettingsPlugin<'_>) -> Result<Output> {
    let metadata = plugin.metadata();
    let text = format!(
        "{} {} ({})\ntrigger: {:?}\nsynopsis: {}",
        metadata.name,
        metadata.version,
        metadata.description,
        plugin.trigger(),
        plugin.synopsis(""),
    );
    let data = json!({
        "id": plugin.id(),
        "metadata": metadata,
        "default_trigger": plugin.default_trigger(),
        "trigger": plugin.trigger(),
        "synopsis": plugin.synopsis(""),
        "pages": plugin.catalog().len(),
    });
    Ok(Output { data, text })
}

fn run_query(plugin: &SettingsPlugin<'_>, input: &str) -> Result<Output> {
    let mut query = TriggerQuery::from_input(input, plugin.trigger());
    plugin.handle_trigger_query(&mut query);
    let items = query.into_items();

    let text = items
        .iter()
        .map(format_item)
        .collect::<Vec<_>>()
        .join("\n");
    let data = json!({ "items": items });
    Ok(Output { data, text })
}

fn run_global(plugin: &SettingsPlugin<'_>, input: &str) -> Result<Output> {
    let ranked: Vec<RankItem> = plugin.handle_global_query(input);

    let text = ranked
        .iter()
        .map(|rank| format!("[{}] {}", rank.score, format_item(&rank.item)))
        .collect::<Vec<_>>()
        .join("\n");
    let data = json!({ "results": ranked });
    Ok(Output { data, text })
}

fn run_open(plugin: &SettingsPlugin<'_>, page_id: &str, dry_run: bool) -> Result<Output> {
    let item = plugin.build_item(page_id)?;
    let action = item
        .default_action()
        .ok_or_else(|| anyhow!("{} has no action", item.id))?;

    let recorder = RecordingLauncher::default();
    let launcher: &dyn Launcher = if dry_run { &recorder } else { &ProcessLauncher };
    action
        .invoke(launcher)
        .with_context(|| format!("Failed to open {}", item.text))?;

    let text = if dry_run {
        action.command.join(" ")
    } else {
        log::info!("opened {}", item.text);
        String::new()
    };
    let data = json!({
        "item_id": item.id,
        "action_id": action.id,
        "command": action.command,
        "dry_run": dry_run,
    });
    Ok(Output { data, text })
}

fn format_item(item: &Item) -> String {
    let id = item.id.strip_prefix("settings:").unwrap_or(&item.id);
    format!("{id:<16} {} - {}", item.text, item.subtext)
}
