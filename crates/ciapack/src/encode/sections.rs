use std::io::{ErrorKind as IoErrorKind, Write};

use deku::DekuContainerWrite;
use tracing::{debug, info, instrument};

use crate::{
	decode::{Ticket, TitleMetadata},
	error::{Error, ErrorKind, Result, SimpleError},
	format::{CiaHeader, ContentChunk},
	source::ContentSource,
};

use super::Encoder;

/// One section of an archive, in write order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Section<'data> {
	/// Byte blocks written back to back and padded to alignment as one.
	Padded(Vec<&'data [u8]>),

	/// A content payload streamed from the content source, unpadded.
	Content(&'data ContentChunk),
}

impl<'data> Section<'data> {
	/// The sections of an archive, given its serialised header.
	///
	/// The order is fixed: header, certificate chain (CA, XS, CP), ticket, TMD, then contents in
	/// TMD order.
	pub fn all(
		header: &'data [u8],
		tmd: &'data TitleMetadata<'data>,
		ticket: &'data Ticket<'data>,
	) -> Vec<Self> {
		let mut sections = vec![
			Self::Padded(vec![header]),
			Self::Padded(vec![
				ticket.ca_certificate(),
				ticket.xs_certificate(),
				tmd.certificate(),
			]),
			Self::Padded(vec![ticket.header()]),
			Self::Padded(vec![tmd.header()]),
		];
		sections.extend(tmd.contents.iter().map(Self::Content));
		sections
	}
}

impl<'writer, W: Write> Encoder<'writer, W> {
	/// Write one section.
	pub fn write_section<S: ContentSource>(&mut self, section: &Section<'_>, source: &S) -> Result<u64> {
		match section {
			Section::Padded(parts) => self.write_padded(parts),
			Section::Content(chunk) => {
				let id = chunk.content_id();
				let reader = source.open(id).map_err(|err| match err.kind() {
					IoErrorKind::NotFound => Error::from(ErrorKind::MissingContentFile(id)),
					_ => Error::Io(err),
				})?;
				self.write_content(chunk, reader)
			}
		}
	}

	/// Write a whole archive for a TMD and ticket, with contents from a source.
	///
	/// Stops at the first failure, which is returned as is. Bytes already written stay written:
	/// use [`build()`](crate::build) to avoid leaving a partial archive behind.
	#[instrument(level = "debug", skip(self, tmd, ticket, source), fields(title_id = %tmd.title_id))]
	pub fn write_archive<S: ContentSource>(
		&mut self,
		tmd: &TitleMetadata<'_>,
		ticket: &Ticket<'_>,
		source: &S,
	) -> Result<CiaHeader> {
		let header = CiaHeader::build(tmd, ticket)?;
		let header_bytes = header.to_bytes().map_err(SimpleError::from_deku)?;

		let sections = Section::all(&header_bytes, tmd, ticket);
		debug!(count = sections.len(), "write sections");
		for section in &sections {
			self.write_section(section, source)?;
		}

		info!(length = self.offset(), contents = tmd.contents.len(), "wrote archive");
		Ok(header)
	}
}
