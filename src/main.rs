use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tsfix_cli::config::{
	CONFIG_FILE_NAME, Overrides, Settings, generate_init_template, load_config, resolve_settings,
};
use tsfix_cli::patcher::{PatchEvent, PatchOptions, PatchSummary, Patcher};
use tsfix_cli::rules::compile_rules;

#[derive(Parser)]
#[command(name = "tsfix")]
#[command(
	author,
	version,
	about = "CLI tool for applying ordered regex fix-up rules to a source tree"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Directory to patch (defaults to the configured root, then backend/src).
	/// A directory named `config` must be given as `./config`.
	#[arg(value_name = "ROOT")]
	root: Option<PathBuf>,

	/// Config file to use instead of discovering .tsfix.toml
	#[arg(short, long, value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// Only patch files whose names end with this suffix
	#[arg(short, long, value_name = "SUFFIX", global = true)]
	suffix: Option<String>,

	/// Extra rule as a sed-like expression, applied after all other rules
	#[arg(short = 'e', long = "expr", value_name = "s/PATTERN/REPLACEMENT/", global = true)]
	exprs: Vec<String>,

	/// Skip the built-in rule set
	#[arg(long, global = true)]
	no_builtin: bool,

	/// Report files that would change without writing them
	#[arg(short = 'n', long)]
	dry_run: bool,

	/// Create a template .tsfix.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .tsfix.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Increase diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display effective settings and the ordered rule list
	Show,
	/// Check the config and compile all rules without touching any file
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logger(cli.verbose);

	if cli.init {
		return handle_init(cli.force);
	}

	let overrides = Overrides {
		root: cli.root.clone(),
		suffix: cli.suffix.clone(),
		no_builtin: cli.no_builtin,
		expressions: cli.exprs.clone(),
	};

	if let Some(command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(cli.config.as_deref(), &overrides),
				ConfigAction::Validate => {
					handle_config_validate(cli.config.as_deref(), &overrides)
				}
			},
		};
	}

	handle_patch(cli.config.as_deref(), &overrides, cli.dry_run, cli.verbose > 0)
}

fn init_logger(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	// RUST_LOG, when set, wins over -v
	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.format_timestamp(None)
		.init();
}

fn load_settings(config: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let loaded = load_config(config, &cwd).context("Failed to load configuration")?;

	match loaded {
		Some(ref l) => log::info!("using config {}", l.path.display()),
		None => log::info!("no {} found, using defaults", CONFIG_FILE_NAME),
	}

	resolve_settings(loaded.as_ref(), overrides).context("Invalid configuration")
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_patch(
	config: Option<&Path>,
	overrides: &Overrides,
	dry_run: bool,
	show_counts: bool,
) -> Result<ExitCode> {
	let settings = load_settings(config, overrides)?;
	let rules = compile_rules(&settings.rules).context("Failed to compile rules")?;
	log::info!(
		"applying {} rule(s) to *{} under {}",
		rules.len(),
		settings.suffix,
		settings.root.display()
	);

	let options = PatchOptions {
		root: settings.root,
		suffix: settings.suffix,
		dry_run,
	};
	let summary = Patcher::new(options, rules).run(|event| print_event(event, show_counts));

	println!();
	println!("{}", completion_line(&summary, dry_run));

	// Per-file failures are in the report; the run itself succeeded
	Ok(ExitCode::SUCCESS)
}

fn print_event(event: &PatchEvent, show_counts: bool) {
	match event {
		PatchEvent::Fixed { path, replacements } => println!(
			"✅ Fixed: {}{}",
			path.display(),
			count_suffix(*replacements, show_counts)
		),
		PatchEvent::WouldFix { path, replacements } => println!(
			"🔎 Would fix: {}{}",
			path.display(),
			count_suffix(*replacements, show_counts)
		),
		PatchEvent::Failed { path, error } => {
			println!("❌ Error processing {}: {}", path.display(), error.detail())
		}
	}
}

fn count_suffix(replacements: usize, show: bool) -> String {
	match (show, replacements) {
		(false, _) => String::new(),
		(true, 1) => " (1 replacement)".to_string(),
		(true, n) => format!(" ({n} replacements)"),
	}
}

fn completion_line(summary: &PatchSummary, dry_run: bool) -> String {
	let verb = if dry_run { "would be fixed" } else { "fixed" };
	format!(
		"✨ Patching complete: {} {}, {} errors, {} files scanned",
		summary.fixed, verb, summary.failed, summary.scanned
	)
}

fn handle_config_show(config: Option<&Path>, overrides: &Overrides) -> Result<ExitCode> {
	let settings = load_settings(config, overrides)?;

	match settings.config_path {
		Some(ref path) => println!("# Source: {}", path.display()),
		None => println!("# Source: built-in defaults (no {CONFIG_FILE_NAME} found)"),
	}
	println!("# root: {}", settings.root.display());
	println!("# suffix: {}", settings.suffix);
	println!("# rules: {}", settings.rules.len());
	println!();

	for (i, rwo) in settings.rules.iter().enumerate() {
		println!("  Rule {} [{}]:", i + 1, rwo.origin);
		println!("    pattern: {}", rwo.rule.pattern);
		println!("    replacement: {:?}", rwo.rule.replacement);
		if let Some(ref description) = rwo.rule.description {
			println!("    description: {}", description);
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(config: Option<&Path>, overrides: &Overrides) -> Result<ExitCode> {
	let checked = load_settings(config, overrides).and_then(|settings| {
		let rules = compile_rules(&settings.rules).context("Failed to compile rules")?;
		Ok((settings, rules.len()))
	});

	match checked {
		Ok((settings, count)) => {
			match settings.config_path {
				Some(ref path) => println!("Configuration is valid: {}", path.display()),
				None => println!("No configuration file found; built-in defaults are valid."),
			}
			println!("  {} rules compiled", count);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e:#}");
			Ok(ExitCode::FAILURE)
		}
	}
}
