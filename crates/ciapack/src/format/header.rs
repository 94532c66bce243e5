//! CIA header structure and content index bitmap.
//!
//! The header is the first [`CIA_HEADER_SIZE`] bytes of a CIA. It records the length of each
//! following section, so a reader can find them without scanning, and a bitmap of which content
//! indices the archive carries.

use deku::prelude::*;

use super::constants::{CIA_HEADER_SIZE, CIA_TYPE, CIA_VERSION, CONTENT_INDEX_LEN};

/// CIA header.
///
/// All fields are little-endian. The struct serialises to exactly [`CIA_HEADER_SIZE`] bytes.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct CiaHeader {
	/// Length of this header. Always [`CIA_HEADER_SIZE`].
	pub header_size: u32,

	/// Archive type. Always [`CIA_TYPE`].
	pub archive_type: u16,

	/// Format version. Always [`CIA_VERSION`].
	pub version: u16,

	/// Length of the certificate chain section, before padding.
	pub cert_size: u32,

	/// Length of the ticket section, before padding.
	pub ticket_size: u32,

	/// Length of the TMD section, before padding.
	pub tmd_size: u32,

	/// Length of the meta section. Meta sections are not supported, so this is always zero.
	pub meta_size: u32,

	/// Total length of all content payloads.
	pub content_size: u64,

	/// Content index bitmap. See [`ContentIndex`].
	pub content_index: [u8; CONTENT_INDEX_LEN],
}

impl CiaHeader {
	/// A header with the fixed fields set, and everything else zero.
	pub fn empty() -> Self {
		Self {
			header_size: CIA_HEADER_SIZE as u32,
			archive_type: CIA_TYPE,
			version: CIA_VERSION,
			cert_size: 0,
			ticket_size: 0,
			tmd_size: 0,
			meta_size: 0,
			content_size: 0,
			content_index: [0; CONTENT_INDEX_LEN],
		}
	}

	/// A copy of the content index bitmap.
	pub fn content_index(&self) -> ContentIndex {
		ContentIndex(self.content_index)
	}
}

/// Content index bitmap.
///
/// One bit per possible content index, most significant bit first: index 0 is the high bit of
/// byte 0, index 8 the high bit of byte 1, and index 65535 the low bit of the last byte.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContentIndex(pub [u8; CONTENT_INDEX_LEN]);

impl Default for ContentIndex {
	fn default() -> Self {
		Self([0; CONTENT_INDEX_LEN])
	}
}

impl ContentIndex {
	const fn position(index: u16) -> (usize, u8) {
		((index >> 3) as usize, 0x80 >> (index & 7))
	}

	/// Mark a content index as present.
	pub fn insert(&mut self, index: u16) {
		let (byte, mask) = Self::position(index);
		self.0[byte] |= mask;
	}

	/// Whether a content index is present.
	pub fn contains(&self, index: u16) -> bool {
		let (byte, mask) = Self::position(index);
		self.0[byte] & mask != 0
	}

	/// Iterate over present content indices, in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
		(0..=u16::MAX).filter(|index| self.contains(*index))
	}
}

impl FromIterator<u16> for ContentIndex {
	fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
		let mut bitmap = Self::default();
		for index in iter {
			bitmap.insert(index);
		}
		bitmap
	}
}

impl From<ContentIndex> for [u8; CONTENT_INDEX_LEN] {
	fn from(bitmap: ContentIndex) -> Self {
		bitmap.0
	}
}
