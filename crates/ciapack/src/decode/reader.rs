use std::borrow::Cow;

use crate::error::{ErrorKind, Result};

/// Bounds-checked reads at fixed offsets of a byte buffer.
///
/// Every read names the region it's after, so that a short buffer produces a
/// [`TruncatedInput`](ErrorKind::TruncatedInput) error saying which part is missing rather than a
/// panic or a silently short slice.
#[derive(Clone, Copy, Debug)]
pub struct SliceReader<'data> {
	source: &'static str,
	data: &'data [u8],
}

impl<'data> SliceReader<'data> {
	/// Wrap a buffer. `source` prefixes region names in errors.
	pub fn new(source: &'static str, data: &'data [u8]) -> Self {
		Self { source, data }
	}

	/// Name of the buffer.
	pub fn source(&self) -> &'static str {
		self.source
	}

	/// The whole buffer.
	pub fn data(&self) -> &'data [u8] {
		self.data
	}

	/// Borrow `len` bytes at `offset`.
	pub fn bytes(
		&self,
		region: impl Into<Cow<'static, str>>,
		offset: usize,
		len: usize,
	) -> Result<&'data [u8]> {
		let end = offset.checked_add(len);
		match end.and_then(|end| self.data.get(offset..end)) {
			Some(bytes) => Ok(bytes),
			None => Err(ErrorKind::TruncatedInput {
				region: format!("{} {}", self.source, region.into()).into(),
				end: end.unwrap_or(usize::MAX),
				available: self.data.len(),
			}
			.into()),
		}
	}

	/// Copy `N` bytes at `offset`.
	pub fn array<const N: usize>(
		&self,
		region: impl Into<Cow<'static, str>>,
		offset: usize,
	) -> Result<[u8; N]> {
		let mut array = [0; N];
		array.copy_from_slice(self.bytes(region, offset, N)?);
		Ok(array)
	}

	/// Read a big-endian u16 at `offset`.
	pub fn u16_be(&self, region: impl Into<Cow<'static, str>>, offset: usize) -> Result<u16> {
		self.array(region, offset).map(u16::from_be_bytes)
	}

	/// Read a big-endian u32 at `offset`.
	pub fn u32_be(&self, region: impl Into<Cow<'static, str>>, offset: usize) -> Result<u32> {
		self.array(region, offset).map(u32::from_be_bytes)
	}
}
