//! Content payload sources.
//!
//! The assembler needs one reader per content, looked up by content id. This is implemented for
//! directories ([`Path`] and [`PathBuf`]) laid out like the CDN, where each payload is a file
//! named by the content id in lowercase hex, and for in-memory maps.

use std::{
	collections::HashMap,
	fs::File,
	io::{Error, ErrorKind, Read, Result},
	path::{Path, PathBuf},
};

use crate::format::ContentId;

/// Opens content payloads by content id.
pub trait ContentSource {
	/// The output reader type.
	type Reader: Read;

	/// Open the payload of a content.
	///
	/// Returns an error of kind [`NotFound`](ErrorKind::NotFound) if there is no such content.
	fn open(&self, id: ContentId) -> Result<Self::Reader>;
}

impl ContentSource for &Path {
	type Reader = File;

	fn open(&self, id: ContentId) -> Result<Self::Reader> {
		File::open(self.join(id.file_name()))
	}
}

impl ContentSource for PathBuf {
	type Reader = File;

	fn open(&self, id: ContentId) -> Result<Self::Reader> {
		self.as_path().open(id)
	}
}

impl<'map> ContentSource for &'map HashMap<ContentId, Vec<u8>> {
	type Reader = &'map [u8];

	fn open(&self, id: ContentId) -> Result<Self::Reader> {
		let map: &'map HashMap<ContentId, Vec<u8>> = *self;
		map.get(&id)
			.map(Vec::as_slice)
			.ok_or_else(|| Error::new(ErrorKind::NotFound, format!("no content {id}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn directories_name_payloads_in_hex() {
		let dir = tempfile::tempdir().expect("tempdir");
		std::fs::write(dir.path().join("0000000a"), b"payload").expect("write payload");

		let mut contents = String::new();
		dir.path()
			.open(ContentId::from(0x0A))
			.expect("open payload")
			.read_to_string(&mut contents)
			.expect("read payload");
		assert_eq!(contents, "payload");

		let err = dir.path().to_path_buf().open(ContentId::from(0x0B)).expect_err("missing");
		assert_eq!(err.kind(), ErrorKind::NotFound);
	}

	#[test]
	fn maps_serve_slices() {
		let map = HashMap::from([(ContentId::from(1), vec![1, 2, 3])]);
		let source = &map;
		assert_eq!(source.open(ContentId::from(1)).expect("present"), &[1, 2, 3]);
		assert_eq!(
			source.open(ContentId::from(2)).expect_err("absent").kind(),
			ErrorKind::NotFound
		);
	}
}
