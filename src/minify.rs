use std::path::PathBuf;
use std::time::Duration;
use anyhow::Result;
use color_print::*;
use crate::compiler::Compiler;
use crate::config::{BuildConfig, CONFIG_FILE};
use crate::context::{Context, Node, WriteOutcome};
use crate::error::Error;
use crate::tokens;
use crate::types::CompressionLevel;

#[derive(clap::Args, Clone, Debug)]
pub struct Args {
	/// Project root that all configured paths are relative to
	#[arg(short = 'C', long, default_value = ".")]
	dir: PathBuf,

	/// Build config file [default: <DIR>/jsig-build.toml]
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Compilation level: WHITESPACE_ONLY, SIMPLE_OPTIMIZATIONS or ADVANCED_OPTIMIZATIONS
	#[arg(short, long)]
	level: Option<String>,

	/// Timeout for the compiler request, in seconds
	#[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
	timeout: Option<u64>,

	/// Create output files that don't exist yet instead of skipping them
	#[arg(long)]
	create: bool,
}

#[derive(Debug)]
pub struct Output {
	pub node: Node,
	pub outcome: WriteOutcome,
}

#[derive(Debug)]
pub struct BundleReport {
	pub minified: Output,
	pub noconflict: Output,
}

impl BundleReport {
	fn print(&self) {
		for output in [&self.minified, &self.noconflict] {
			match output.outcome {
				WriteOutcome::Updated => cprintln!("<g>Wrote <s>{}", output.node.fullpath()),
				WriteOutcome::Created => cprintln!("<g>Created <s>{}", output.node.fullpath()),
				WriteOutcome::SkippedMissing => {
					cprintln!("<y>Skipped <s>{}</> (file does not exist, pass <s>--create</> to create it)", output.node.fullpath());
				}
			}
		}
	}
}

pub async fn run(args: Args) -> Result<()> {
	let config_path = args.config.clone().unwrap_or_else(|| args.dir.join(CONFIG_FILE));
	let mut config = BuildConfig::load(&config_path, args.config.is_some()).await?;

	if args.level.is_some() {
		config.compiler.level = args.level;
	}

	if let Some(timeout) = args.timeout {
		config.compiler.timeout_secs = timeout;
	}

	config.create_missing |= args.create;

	let context = Context::new(args.dir).create_missing(config.create_missing);
	let compiler = Compiler::new(&config.compiler.endpoint, Duration::from_secs(config.compiler.timeout_secs))?;

	let report = minify_bundle(&context, &config, &compiler).await?;
	report.print();

	Ok(())
}

/// Concatenates the main source and plugins, compiles them remotely and writes the
/// plain and no-conflict minified bundles. Aborts on the first error without undoing
/// earlier writes.
pub async fn minify_bundle(context: &Context, config: &BuildConfig, compiler: &Compiler) -> Result<BundleReport, Error> {
	let src = context.node(&config.source);
	let dist = context.node(&config.dist);
	let plugins_dir = context.node(&config.plugins_dir);

	let minified = dist.append_suffix(src.name()).strip_suffix(".js").append_suffix(".min.js");
	cprintln!("<b!>Compressing <w><s>{}</></> into <w><s>{}", src, minified.fullpath());

	let source = read_input(&src).await?;
	let revision = tokens::revision_label(context.root()).await;
	let mut parts = vec![tokens::substitute(&source, &tokens::build_date(), &revision)];

	for plugin in &config.plugins {
		parts.push(read_input(&plugins_dir.append_suffix(plugin)).await?);
	}

	let level = CompressionLevel::resolve(config.compiler.level.as_deref());
	let code = compiler.compress(&parts.join(" "), Some(level)).await?;
	let outcome = minified.write_text(&code).await?;

	let noconflict = minified.strip_suffix(".js").append_suffix(".noconflict.js");
	let noconflict_outcome = noconflict.write_text(&wrap_noconflict(&code, &config.wrapper_alias)).await?;

	tracing::info!(minified = ?outcome, noconflict = ?noconflict_outcome, "bundle finished");

	Ok(BundleReport {
		minified: Output { node: minified, outcome },
		noconflict: Output { node: noconflict, outcome: noconflict_outcome },
	})
}

async fn read_input(node: &Node) -> Result<String, Error> {
	node.read_text()
		.await?
		.ok_or_else(|| Error::MissingInput { path: node.path() })
}

/// Wraps `code` so it sees `alias` as `$` without touching the global `$`.
pub fn wrap_noconflict(code: &str, alias: &str) -> String {
	format!(";(function($){{\n{}\n}})({});", code, alias)
}
