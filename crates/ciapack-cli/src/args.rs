use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::{build::BuildArgs, inspect::InspectArgs};

/// Repackage CDN title files into a CIA archive.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "ciapack",
	bin_name = "ciapack",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs. Use multiple
	/// times to increase verbosity.
	///
	/// You may want to use with '--log-file' to avoid polluting your terminal.
	///
	/// If $RUST_LOG is set, this flag is ignored.
	#[arg(
		long,
		short,
		action = clap::ArgAction::Count,
		num_args = 0,
		global = true,
	)]
	pub verbose: Option<u8>,

	/// Write diagnostic logs to a file.
	///
	/// This writes diagnostic logs to a file, instead of the terminal, in JSON format.
	///
	/// If the path provided is a directory, a file will be created in that directory. The file
	/// name will be the current date and time, in the format 'ciapack.YYYY-MM-DDTHH-MM-SSZ.log'.
	#[arg(
		long,
		num_args = 0..=1,
		default_missing_value = ".",
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
		global = true,
	)]
	pub log_file: Option<PathBuf>,

	/// What to do.
	#[command(subcommand)]
	pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// Build a CIA from a directory of CDN files.
	Build(BuildArgs),

	/// Print the header and layout of a CIA.
	Inspect(InspectArgs),
}
