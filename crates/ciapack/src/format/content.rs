use deku::prelude::*;

use super::constants::{CONTENT_HASH_LEN, CONTENT_ID_LEN};

/// Content chunk record, as found in the TMD's content chunk table.
///
/// All integers are big-endian on the wire. Each record is exactly
/// [`CONTENT_CHUNK_LEN`][super::CONTENT_CHUNK_LEN] bytes.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct ContentChunk {
	/// Content id. Names the content's file on the CDN.
	pub id: [u8; CONTENT_ID_LEN],

	/// Content index. Sets this bit in the CIA's content index bitmap.
	pub index: u16,

	/// Content type flags.
	pub kind: u16,

	/// Size in bytes of the content payload.
	pub size: u64,

	/// SHA-256 of the decrypted content.
	pub hash: [u8; CONTENT_HASH_LEN],
}

impl ContentChunk {
	/// The content id, as a displayable identifier.
	pub fn content_id(&self) -> ContentId {
		ContentId(self.id)
	}
}

/// Content identifier.
///
/// Displayed as 8 lowercase hex digits, which is also the name of the content payload file.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub [u8; CONTENT_ID_LEN]);

impl ContentId {
	/// The file name of this content's payload.
	pub fn file_name(self) -> String {
		hex::encode(self.0)
	}
}

impl From<u32> for ContentId {
	fn from(id: u32) -> Self {
		Self(id.to_be_bytes())
	}
}

impl std::fmt::Display for ContentId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.file_name())
	}
}
