//! Error types for parsing inputs and building archives.
use std::{borrow::Cow, path::PathBuf};

use deku::DekuError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::format::ContentId;

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined return error type.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// I/O error while reading a stream or writing the archive.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// A file could not be opened, created, or moved into place.
	#[error("{what}: {}", path.display())]
	Open {
		/// What was being done with the file.
		what: &'static str,

		/// Path of the file.
		path: PathBuf,

		/// Underlying error.
		#[source]
		source: std::io::Error,
	},

	/// Error that's just a message.
	#[error(transparent)]
	Simple(#[from] SimpleError),

	/// Error that includes source.
	#[error(transparent)]
	Source(#[from] SourceError),
}

impl Error {
	/// The kind of error, if this isn't an I/O error.
	pub fn kind(&self) -> Option<&ErrorKind> {
		match self {
			Self::Simple(err) => Some(&err.kind),
			Self::Source(err) => Some(&err.kind),
			Self::Io(_) | Self::Open { .. } => None,
		}
	}

	pub(crate) fn open(what: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
		let path = path.into();
		move |source| Self::Open { what, path, source }
	}
}

/// Error with a message.
#[derive(Error, Diagnostic, Debug)]
#[error("ciapack: {message}")]
pub struct SimpleError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,
}

/// Error with a snippet of the offending bytes.
#[derive(Error, Diagnostic, Debug)]
#[error("ciapack: {message}")]
pub struct SourceError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,

	/// Error location in the snippet.
	#[label("here")]
	pub at: SourceSpan,

	/// Snippet of the input.
	#[source_code]
	pub snippet: String,
}

impl SimpleError {
	/// New error without source.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			message: kind.default_message(),
			kind,
		}
	}

	/// New simple error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::new(ErrorKind::Parse).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

impl SourceError {
	/// New error with source snippet.
	pub fn new(kind: ErrorKind, snippet: &[u8], at_byte: usize) -> Self {
		Self {
			message: kind.default_message(),
			kind,
			snippet: format!("{snippet:02x?}"),
			at: SourceSpan::from((
				(at_byte * 4) + 1, // each byte is "xx, " after the opening [
				2,                 // always 2 bytes for the hex value
			)),
		}
	}

	/// New error with source snippet, extracted from a larger source.
	pub fn from_source(kind: ErrorKind, source: &[u8], at_byte: usize, context: usize) -> Self {
		let start = at_byte.saturating_sub(context).min(source.len());
		let end = at_byte.saturating_add(context).min(source.len());
		Self::new(kind, &source[start..end], at_byte.saturating_sub(start))
	}

	/// New error from deku.
	pub fn from_deku(orig: DekuError, source: &[u8], at_byte: usize, context: usize) -> Self {
		Self::from_source(ErrorKind::Parse, source, at_byte, context).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

/// Error kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The signature type code of a TMD or ticket is not one this crate knows the size of.
	InvalidSignatureType(u32),

	/// A region of the input extends past the end of the buffer.
	TruncatedInput {
		/// Which region was being read.
		region: Cow<'static, str>,

		/// Offset one past the last byte of the region.
		end: usize,

		/// Length of the buffer.
		available: usize,
	},

	/// The TMD references a content that the content source doesn't have.
	MissingContentFile(ContentId),

	/// A content payload's length doesn't match the size recorded in the TMD.
	ContentSizeMismatch {
		/// Content id.
		id: ContentId,

		/// Size from the TMD.
		expected: u64,

		/// Bytes actually read from the payload.
		actual: u64,
	},

	/// A computed total doesn't fit in its CIA header field.
	FieldOverflow(&'static str),

	/// The header size field of an archive isn't the one this crate reads.
	UnsupportedHeaderSize(u32),

	/// Parse error.
	Parse,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(&self) -> Cow<'static, str> {
		match self {
			ErrorKind::InvalidSignatureType(code) => {
				Cow::Owned(format!("invalid signature type 0x{code:08X}"))
			}
			ErrorKind::TruncatedInput {
				region,
				end,
				available,
			} => Cow::Owned(format!(
				"truncated input: {region} ends at byte {end} but only {available} bytes are available"
			)),
			ErrorKind::MissingContentFile(id) => Cow::Owned(format!("missing content file {id}")),
			ErrorKind::ContentSizeMismatch {
				id,
				expected,
				actual,
			} => Cow::Owned(format!(
				"content {id} is {actual} bytes but the TMD says {expected}"
			)),
			ErrorKind::FieldOverflow(field) => {
				Cow::Owned(format!("{field} is too large for the cia header"))
			}
			ErrorKind::UnsupportedHeaderSize(size) => Cow::Owned(format!(
				"unsupported cia header size 0x{size:X}, this ciapack supports 0x{:X}",
				crate::format::CIA_HEADER_SIZE
			)),
			ErrorKind::Parse => Cow::Borrowed("parse error"),
		}
	}
}

impl From<ErrorKind> for SimpleError {
	fn from(ek: ErrorKind) -> Self {
		Self::new(ek)
	}
}

impl From<ErrorKind> for Error {
	fn from(ek: ErrorKind) -> Self {
		Self::Simple(ek.into())
	}
}
