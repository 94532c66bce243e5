//! Reading built archives back.
//!
//! The header is all that's needed to locate every section: each is placed right after the
//! previous one, padded to alignment, except contents which follow each other directly.

use std::io::Read;

use deku::DekuContainerRead;
use tracing::{debug, instrument};

use crate::{
	error::{ErrorKind, Result, SimpleError, SourceError},
	format::{aligned_len, CiaHeader, CIA_HEADER_SIZE},
};

/// Read and check a CIA header from the start of a reader.
#[instrument(level = "debug", skip(reader))]
pub fn read_header<R: Read>(reader: &mut R) -> Result<CiaHeader> {
	let mut bytes = vec![0; CIA_HEADER_SIZE];
	reader.read_exact(&mut bytes)?;

	let (_, header) = CiaHeader::from_bytes((bytes.as_slice(), 0)).map_err(SimpleError::from_deku)?;
	if header.header_size as usize != CIA_HEADER_SIZE {
		return Err(SourceError::from_source(
			ErrorKind::UnsupportedHeaderSize(header.header_size),
			&bytes,
			0,
			4,
		)
		.into());
	}

	debug!(
		cert_size = header.cert_size,
		ticket_size = header.ticket_size,
		tmd_size = header.tmd_size,
		content_size = header.content_size,
		"read cia header"
	);
	Ok(header)
}

/// Byte offsets of each section of an archive, derived from its header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Layout {
	/// Offset of the certificate chain.
	pub certificates: u64,

	/// Offset of the ticket.
	pub ticket: u64,

	/// Offset of the TMD.
	pub tmd: u64,

	/// Offset of the first content.
	pub contents: u64,

	/// Total length of the archive.
	pub length: u64,
}

impl Layout {
	/// Compute the layout of the archive described by a header.
	pub fn of(header: &CiaHeader) -> Self {
		let certificates = aligned_len(header.header_size.into());
		let ticket = certificates + aligned_len(header.cert_size.into());
		let tmd = ticket + aligned_len(header.ticket_size.into());
		let contents = tmd + aligned_len(header.tmd_size.into()) + aligned_len(header.meta_size.into());
		Self {
			certificates,
			ticket,
			tmd,
			contents,
			length: contents + header.content_size,
		}
	}
}

#[cfg(test)]
mod tests {
	use deku::DekuContainerWrite;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn layout_pads_all_but_contents() {
		let header = CiaHeader {
			cert_size: 0xA00,
			ticket_size: 0x350,
			tmd_size: 0xB64,
			content_size: 300,
			..CiaHeader::empty()
		};
		assert_eq!(
			Layout::of(&header),
			Layout {
				certificates: 0x2040,
				ticket: 0x2A40,
				tmd: 0x2DC0,
				contents: 0x2DC0 + 0xB80,
				length: 0x2DC0 + 0xB80 + 300,
			}
		);
	}

	#[test]
	fn rejects_other_header_sizes() {
		let header = CiaHeader {
			header_size: 0x2040,
			..CiaHeader::empty()
		};
		let bytes = header.to_bytes().expect("serialise");
		let err = read_header(&mut bytes.as_slice()).expect_err("bad header size");
		assert_eq!(err.kind(), Some(&ErrorKind::UnsupportedHeaderSize(0x2040)));
	}

	#[test]
	fn short_archives_are_io_errors() {
		let err = read_header(&mut &[0_u8; 100][..]).expect_err("short");
		assert!(err.kind().is_none());
	}
}
