//! Common types defining the binary format structures.
//!
//! This covers both sides: the TMD and ticket structures as they come off the CDN, and the CIA
//! header this crate writes. Offsets and lengths live in [`constants`].

#[doc(inline)]
pub use self::constants::*;
#[doc(inline)]
pub use self::content::{ContentChunk, ContentId};
#[doc(inline)]
pub use self::header::{CiaHeader, ContentIndex};
#[doc(inline)]
pub use self::signature::SignatureType;

pub mod constants;
mod content;
mod header;
mod signature;

/// Title identifier.
///
/// Appears in both the TMD and the ticket. Displayed as 16 lowercase hex digits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TitleId(pub [u8; TITLE_ID_LEN]);

impl TitleId {
	/// The identifier as a big-endian integer.
	pub fn as_u64(self) -> u64 {
		u64::from_be_bytes(self.0)
	}
}

impl std::fmt::Display for TitleId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&hex::encode(self.0))
	}
}

/// Number of zero bytes needed after a section of `length` bytes to reach [`ALIGNMENT`].
///
/// Sections already on a boundary get none.
pub const fn padding_len(length: u64) -> u64 {
	(ALIGNMENT - length % ALIGNMENT) % ALIGNMENT
}

/// Round `length` up to the next multiple of [`ALIGNMENT`].
pub const fn aligned_len(length: u64) -> u64 {
	length + padding_len(length)
}
