use std::{fs, path::PathBuf};

use ciapack::{decode::TitleMetadata, format::TMD_FILENAME};
use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;
use tracing::{debug, info};

#[derive(Debug, Clone, Parser)]
pub struct BuildArgs {
	/// Directory with the TMD, CETK, and content files.
	#[arg(
		value_hint = ValueHint::DirPath,
		value_name = "DIR",
	)]
	pub source: PathBuf,

	/// Directory to write the archive into.
	///
	/// Created if it doesn't exist.
	#[arg(long, short,
		default_value = ".",
		value_hint = ValueHint::DirPath,
		value_name = "DIR",
	)]
	pub output_dir: PathBuf,

	/// Name of the archive, without the '.cia' extension.
	///
	/// Defaults to the title id.
	#[arg(long, short)]
	pub name: Option<String>,
}

pub(crate) fn build(args: BuildArgs) -> miette::Result<()> {
	let name = match args.name {
		Some(name) => name,
		None => {
			debug!("read title id for the archive name");
			let tmd = fs::read(args.source.join(TMD_FILENAME)).into_diagnostic()?;
			TitleMetadata::parse(&tmd)?.title_id.to_string()
		}
	};

	info!(path = ?args.output_dir, "create output directory");
	fs::create_dir_all(&args.output_dir).into_diagnostic()?;

	let built = ciapack::build(&args.source, &args.output_dir, &name)?;
	println!("{}", built.path.display());
	Ok(())
}
