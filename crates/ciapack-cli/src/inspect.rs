use std::{fs::File, path::PathBuf};

use ciapack::decode::archive::{read_header, Layout};
use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
	/// Input file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,
}

pub(crate) fn inspect(args: InspectArgs) -> miette::Result<()> {
	info!(path=?args.input, "open input file");
	let mut file = File::open(&args.input).into_diagnostic()?;
	let file_length = file.metadata().into_diagnostic()?.len();

	info!("read header");
	let header = read_header(&mut file)?;
	let layout = Layout::of(&header);

	println!("header size:  0x{:X}", header.header_size);
	println!("type:         {}", header.archive_type);
	println!("version:      {}", header.version);
	println!(
		"certificates: 0x{:X} bytes at 0x{:X}",
		header.cert_size, layout.certificates
	);
	println!(
		"ticket:       0x{:X} bytes at 0x{:X}",
		header.ticket_size, layout.ticket
	);
	println!("tmd:          0x{:X} bytes at 0x{:X}", header.tmd_size, layout.tmd);
	println!("meta:         0x{:X} bytes", header.meta_size);
	println!(
		"contents:     0x{:X} bytes at 0x{:X}",
		header.content_size, layout.contents
	);

	let indices: Vec<String> = header
		.content_index()
		.iter()
		.map(|index| index.to_string())
		.collect();
	println!("indices:      {}", indices.join(", "));

	if layout.length != file_length {
		println!(
			"length:       expected 0x{:X} bytes, file is 0x{:X}",
			layout.length, file_length
		);
	}

	Ok(())
}
