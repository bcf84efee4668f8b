mod types;
mod error;
mod config;
mod context;
mod tokens;
mod compiler;
mod minify;
#[cfg(test)]
mod testing;

use clap::Parser;
use color_print::*;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(version, about, long_about = None)]
struct Cli {
	#[clap(flatten)]
	args: minify::Args,

	/// Increase log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = minify::run(cli.args).await {
		ceprintln!("<r!><s>Error:</></> {}", err);
		std::process::exit(1); // general error
	}

	cprintln!("<g!><s>Done");
}

fn init_tracing(verbose: u8) {
	// RUST_LOG takes precedence over -v
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		let level = match verbose {
			0 => "warn",
			1 => "info",
			2 => "debug",
			_ => "trace",
		};
		EnvFilter::new(format!("jsig_build={}", level))
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
