//! Synthetic CDN files for tests.

use deku::DekuContainerWrite;

use crate::format::{
	ContentChunk, SignatureType, CA_CERTIFICATE_LEN, CERTIFICATE_LEN, CONTENT_CHUNK_LEN,
	CONTENT_HASH_LEN, TICKET_DATA_LEN, TICKET_TITLE_ID_OFFSET, TMD_CONTENT_CHUNKS_OFFSET,
	TMD_CONTENT_COUNT_OFFSET, TMD_TITLE_ID_OFFSET,
};

pub const TITLE_ID: [u8; 8] = [0x00, 0x04, 0x00, 0x00, 0x00, 0x12, 0x34, 0x00];

pub fn chunk(id: u32, index: u16, size: u64) -> ContentChunk {
	ContentChunk {
		id: id.to_be_bytes(),
		index,
		kind: 0x0001,
		size,
		hash: [index as u8; CONTENT_HASH_LEN],
	}
}

pub fn tmd_bytes(signature: SignatureType, chunks: &[ContentChunk]) -> Vec<u8> {
	let table_end = TMD_CONTENT_CHUNKS_OFFSET + CONTENT_CHUNK_LEN * chunks.len();
	let mut data = vec![0; table_end];
	data[..4].copy_from_slice(&signature.code().to_be_bytes());

	let title_id = signature.size() + TMD_TITLE_ID_OFFSET;
	data[title_id..title_id + 8].copy_from_slice(&TITLE_ID);

	let count = u16::try_from(chunks.len()).expect("too many chunks");
	data[TMD_CONTENT_COUNT_OFFSET..TMD_CONTENT_COUNT_OFFSET + 2].copy_from_slice(&count.to_be_bytes());

	for (n, chunk) in chunks.iter().enumerate() {
		let offset = TMD_CONTENT_CHUNKS_OFFSET + CONTENT_CHUNK_LEN * n;
		let bytes = chunk.to_bytes().expect("serialise chunk");
		data[offset..offset + CONTENT_CHUNK_LEN].copy_from_slice(&bytes);
	}

	data.extend([0xC9; CERTIFICATE_LEN]);
	data
}

pub fn ticket_bytes(signature: SignatureType) -> Vec<u8> {
	let mut data = vec![0; signature.size() + TICKET_DATA_LEN];
	data[..4].copy_from_slice(&signature.code().to_be_bytes());

	let title_id = signature.size() + TICKET_TITLE_ID_OFFSET;
	data[title_id..title_id + 8].copy_from_slice(&TITLE_ID);

	data.extend([0x58; CERTIFICATE_LEN]);
	data.extend([0xCA; CA_CERTIFICATE_LEN]);
	data
}
