use std::{
	fs::{self, File},
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};

use crate::{
	decode::{Ticket, TitleMetadata},
	encode::Encoder,
	error::{Error, Result},
	format::{CiaHeader, CIA_EXTENSION, TICKET_FILENAME, TMD_FILENAME},
	source::ContentSource,
};

/// Outcome of a successful build.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Built {
	/// Where the archive was written.
	pub path: PathBuf,

	/// The archive's header.
	pub header: CiaHeader,

	/// Length in bytes of the archive.
	pub length: u64,
}

/// Build a CIA from a CDN directory.
///
/// Reads `TMD` and `CETK` from `source_dir`, and each content from a file in `source_dir` named
/// by its content id in lowercase hex. Writes `<dest_name>.cia` in `dest_dir`, which must exist.
///
/// The archive is written to a temporary file next to the destination and only moved into place
/// once complete, so a failed build leaves nothing at the destination.
#[instrument(level = "debug")]
pub fn build(source_dir: &Path, dest_dir: &Path, dest_name: &str) -> Result<Built> {
	let tmd_path = source_dir.join(TMD_FILENAME);
	let ticket_path = source_dir.join(TICKET_FILENAME);

	info!(path = ?tmd_path, "read tmd");
	let tmd = fs::read(&tmd_path).map_err(Error::open("read tmd", &tmd_path))?;
	info!(path = ?ticket_path, "read ticket");
	let ticket = fs::read(&ticket_path).map_err(Error::open("read ticket", &ticket_path))?;

	let path = dest_dir.join(format!("{dest_name}.{CIA_EXTENSION}"));
	let partial = dest_dir.join(format!(".{dest_name}.{CIA_EXTENSION}.part"));

	info!(path = ?partial, "create temporary output file");
	let file = File::create(&partial).map_err(Error::open("create output", &partial))?;
	let mut writer = BufWriter::new(file);

	match build_to_writer(&tmd, &ticket, &source_dir, &mut writer).and_then(|built| {
		writer
			.into_inner()
			.map_err(|err| Error::Io(err.into_error()))?
			.sync_all()?;
		Ok(built)
	}) {
		Ok((header, length)) => {
			debug!(from = ?partial, to = ?path, "move archive into place");
			fs::rename(&partial, &path).map_err(Error::open("move output into place", &path))?;
			info!(?path, %length, "built archive");
			Ok(Built {
				path,
				header,
				length,
			})
		}
		Err(err) => {
			if let Err(cleanup) = fs::remove_file(&partial) {
				warn!(path = ?partial, %cleanup, "failed to remove partial archive");
			}
			Err(err)
		}
	}
}

/// Build a CIA from in-memory TMD and ticket, writing it to `writer`.
///
/// Returns the archive's header and length. On failure, some of the archive may have been
/// written already.
#[instrument(level = "debug", skip(tmd, ticket, source, writer))]
pub fn build_to_writer<S: ContentSource, W: Write>(
	tmd: &[u8],
	ticket: &[u8],
	source: &S,
	writer: &mut W,
) -> Result<(CiaHeader, u64)> {
	let tmd = TitleMetadata::parse(tmd)?;
	let ticket = Ticket::parse(ticket)?;
	if tmd.title_id != ticket.title_id {
		warn!(tmd = %tmd.title_id, ticket = %ticket.title_id, "tmd and ticket title ids differ");
	}

	let mut encoder = Encoder::new(writer);
	let header = encoder.write_archive(&tmd, &ticket, source)?;
	let length = encoder.finish()?;
	Ok((header, length))
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::{
		error::ErrorKind,
		fixtures::{chunk, ticket_bytes, tmd_bytes},
		format::{ContentId, SignatureType},
	};

	#[test]
	fn writes_to_any_sink() {
		let tmd = tmd_bytes(SignatureType::EcdsaSha256, &[chunk(0x0A, 3, 7)]);
		let ticket = ticket_bytes(SignatureType::Rsa4096Sha256);
		let contents = HashMap::from([(ContentId::from(0x0A), vec![9; 7])]);

		let mut out = Vec::new();
		let (header, length) =
			build_to_writer(&tmd, &ticket, &&contents, &mut out).expect("build");
		assert_eq!(length as usize, out.len());
		assert_eq!(header.content_size, 7);
		assert!(header.content_index().contains(3));
		assert_eq!(&out[out.len() - 7..], &[9; 7]);
	}

	#[test]
	fn bad_tmd_writes_nothing() {
		let mut tmd = tmd_bytes(SignatureType::EcdsaSha256, &[chunk(0x0A, 3, 7)]);
		tmd[3] = 0x09;
		let ticket = ticket_bytes(SignatureType::EcdsaSha256);
		let contents = HashMap::new();

		let mut out = Vec::new();
		let err = build_to_writer(&tmd, &ticket, &&contents, &mut out).expect_err("bad tmd");
		assert_eq!(err.kind(), Some(&ErrorKind::InvalidSignatureType(0x0001_0009)));
		assert!(out.is_empty());
	}
}
