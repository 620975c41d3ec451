//! CLI entrypoint.

use std::error::Error;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use apilisting::source::SourceFilter;
use apilisting::{Analyser, AnalyserOptions, Analysis, NavigationNode, Token, TokenKind};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Args, Clone)]
struct CommonArgs {
	/// Java source file or directory to list
	#[arg(default_value = "./")]
	input: PathBuf,

	/// Name stored on the listing (defaults to the input's file name)
	#[arg(long)]
	name: Option<String>,

	/// Skip files whose path contains this fragment (repeatable, adds to `implementation`)
	#[arg(short = 'x', long = "exclude", value_name = "FRAGMENT")]
	exclude: Vec<String>,

	/// Spaces per indentation level
	#[arg(long, default_value_t = 4)]
	indent: usize,

	/// Parse files one at a time instead of on the thread pool
	#[arg(long, default_value_t = false)]
	sequential: bool,

	/// Increase logging (`-v` debug, `-vv` trace); `RUST_LOG` takes precedence
	#[arg(short = 'v', long, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[derive(Args, Clone)]
struct PrintArgs {
	#[command(flatten)]
	common: CommonArgs,

	/// Disable ANSI colors in CLI output
	#[arg(long, default_value_t = false)]
	no_color: bool,
}

#[derive(Args, Clone)]
struct JsonArgs {
	#[command(flatten)]
	common: CommonArgs,

	/// Write the listing to this file instead of stdout
	#[arg(short = 'O', long)]
	output: Option<PathBuf>,

	/// Emit single-line JSON
	#[arg(long, default_value_t = false)]
	compact: bool,
}

#[derive(Args, Clone)]
struct NavArgs {
	#[command(flatten)]
	common: CommonArgs,
}

#[derive(Subcommand, Clone)]
enum Command {
	/// Print the rendered API listing as text.
	Print(PrintArgs),
	/// Write the listing (tokens and navigation) as JSON.
	Json(JsonArgs),
	/// Print the navigation tree.
	Nav(NavArgs),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parsed command-line options for the apilisting CLI.
struct Cli {
	#[command(subcommand)]
	command: Command,
}

fn main() {
	let cli = Cli::parse();
	let common = match &cli.command {
		Command::Print(args) => &args.common,
		Command::Json(args) => &args.common,
		Command::Nav(args) => &args.common,
	};
	init_tracing(common.verbose);

	if let Err(e) = run(cli) {
		eprintln!("{e}");
		process::exit(1);
	}
}

fn init_tracing(verbose: u8) {
	let filter = match verbose {
		0 => "warn",
		1 => "apilisting=debug,warn",
		_ => "apilisting=trace,info",
	};
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
		.with_writer(std::io::stderr)
		.init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
	match cli.command {
		Command::Print(args) => run_print(&args),
		Command::Json(args) => run_json(&args),
		Command::Nav(args) => run_nav(&args),
	}
}

/// Build the analyser described by the common flags.
fn build_analyser(common: &CommonArgs) -> Analyser {
	let filter = common
		.exclude
		.iter()
		.fold(SourceFilter::new(), |filter, fragment| filter.exclude(fragment.as_str()));
	let options = AnalyserOptions::new()
		.with_listing_name(listing_name(common))
		.with_indent_width(common.indent)
		.with_parallel(!common.sequential)
		.with_source_filter(filter);
	Analyser::new(options)
}

fn listing_name(common: &CommonArgs) -> String {
	if let Some(name) = &common.name {
		return name.clone();
	}
	let resolved = common
		.input
		.canonicalize()
		.unwrap_or_else(|_| common.input.clone());
	resolved
		.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_else(|| apilisting::analyse::DEFAULT_LISTING_NAME.to_string())
}

fn analyse(common: &CommonArgs) -> Result<Analysis, Box<dyn Error>> {
	let analysis = build_analyser(common).analyse_path(&common.input)?;
	if !analysis.diagnostics.is_empty() {
		tracing::info!(count = analysis.diagnostics.len(), "some sources were skipped or partially rendered");
	}
	Ok(analysis)
}

/// Execute the print flow and write the listing text to stdout.
fn run_print(args: &PrintArgs) -> Result<(), Box<dyn Error>> {
	let analysis = analyse(&args.common)?;
	if analysis.listing.tokens.is_empty() {
		println!("No public API found.");
		return Ok(());
	}

	if !should_color_output(args.no_color) {
		print!("{}", analysis.listing.to_text());
		return Ok(());
	}

	let mut buffer = String::new();
	for token in &analysis.listing.tokens {
		buffer.push_str(&colorize(token));
	}
	print!("{buffer}");
	Ok(())
}

/// Execute the JSON flow.
fn run_json(args: &JsonArgs) -> Result<(), Box<dyn Error>> {
	let analysis = analyse(&args.common)?;
	let json = analysis.listing.to_json(!args.compact)?;
	match &args.output {
		Some(path) => write_output(path, &json)?,
		None => println!("{json}"),
	}
	Ok(())
}

fn write_output(path: &Path, json: &str) -> Result<(), Box<dyn Error>> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, json)?;
	tracing::info!(path = %path.display(), "listing written");
	Ok(())
}

/// Execute the nav flow and print the navigation tree.
fn run_nav(args: &NavArgs) -> Result<(), Box<dyn Error>> {
	let analysis = analyse(&args.common)?;
	if analysis.listing.navigation.is_empty() {
		println!("No public types found.");
		return Ok(());
	}
	let mut buffer = String::new();
	for root in &analysis.listing.navigation {
		render_nav(root, 0, &mut buffer);
	}
	print!("{buffer}");
	Ok(())
}

fn render_nav(node: &NavigationNode, depth: usize, buffer: &mut String) {
	buffer.push_str(&format!(
		"{:indent$}{} {} ({})\n",
		"",
		node.kind.as_str(),
		node.text,
		node.id,
		indent = depth * 2
	));
	for child in &node.child_items {
		render_nav(child, depth + 1, buffer);
	}
}

fn colorize(token: &Token) -> String {
	match token.kind {
		TokenKind::NewLine => "\n".to_string(),
		TokenKind::Keyword => token.value.blue().to_string(),
		TokenKind::TypeName if token.navigate_to_id.is_some() => token.value.bright_green().bold().to_string(),
		TokenKind::TypeName => token.value.green().to_string(),
		TokenKind::MemberName => token.value.yellow().to_string(),
		TokenKind::StringLiteral => token.value.red().to_string(),
		TokenKind::Punctuation | TokenKind::Whitespace | TokenKind::Text => token.value.clone(),
	}
}

fn should_color_output(no_color: bool) -> bool {
	if no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stdout().is_terminal()
}
