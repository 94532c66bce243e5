//! Encoder types and functions.
//!
//! The [`Encoder`] writes an archive as an ordered list of [`Section`]s. It never seeks, so any
//! [`Write`] works as a sink, and content payloads are streamed through rather than buffered.

use std::{
	fmt,
	io::{self, Read, Write},
};

use tracing::{instrument, trace};

use crate::{
	error::{ErrorKind, Result},
	format::{padding_len, ContentChunk},
};

#[doc(inline)]
pub use self::sections::Section;

mod header;
mod sections;

/// Archive encoder context.
pub struct Encoder<'writer, W: Write> {
	writer: &'writer mut W,
	offset: u64,
}

impl<W: Write + fmt::Debug> fmt::Debug for Encoder<'_, W> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Encoder")
			.field("writer", &self.writer)
			.field("offset", &self.offset)
			.finish()
	}
}

impl<'writer, W: Write> Encoder<'writer, W> {
	/// Create a new encoder at the start of the writer.
	pub fn new(writer: &'writer mut W) -> Self {
		Self { writer, offset: 0 }
	}

	/// Bytes written so far.
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// Write some byte blocks back to back, then pad to the alignment boundary.
	///
	/// Returns the amount of bytes written, including padding.
	#[instrument(level = "trace", skip(self, parts))]
	pub fn write_padded(&mut self, parts: &[&[u8]]) -> Result<u64> {
		let mut length = 0;
		for part in parts {
			self.writer.write_all(part)?;
			length += part.len() as u64;
		}

		let padding = padding_len(length);
		trace!(%length, %padding, offset = %self.offset, "write padded section");
		io::copy(&mut io::repeat(0).take(padding), &mut *self.writer)?;

		self.offset += length + padding;
		Ok(length + padding)
	}

	/// Stream a content payload, unpadded.
	///
	/// The payload must be exactly as long as the chunk record says.
	#[instrument(level = "trace", skip(self, chunk, reader), fields(id = %chunk.content_id()))]
	pub fn write_content(&mut self, chunk: &ContentChunk, reader: impl Read) -> Result<u64> {
		// read one byte more than expected so that long payloads are caught
		let mut reader = reader.take(chunk.size.saturating_add(1));
		let length = io::copy(&mut reader, &mut *self.writer)?;
		trace!(%length, offset = %self.offset, "wrote content");
		self.offset += length;

		if length != chunk.size {
			return Err(ErrorKind::ContentSizeMismatch {
				id: chunk.content_id(),
				expected: chunk.size,
				actual: length,
			}
			.into());
		}

		Ok(length)
	}

	/// Flush the underlying writer.
	pub fn finish(self) -> Result<u64> {
		self.writer.flush()?;
		Ok(self.offset)
	}
}
