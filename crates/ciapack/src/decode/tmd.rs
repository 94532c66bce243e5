use deku::DekuContainerRead;
use tracing::{debug, instrument, trace};

use crate::{
	error::{Result, SourceError},
	format::{
		ContentChunk, SignatureType, TitleId, CERTIFICATE_LEN, CONTENT_CHUNK_LEN,
		TMD_CONTENT_CHUNKS_OFFSET, TMD_CONTENT_COUNT_OFFSET, TMD_TITLE_ID_OFFSET,
	},
};

use super::{read_signature_type, SliceReader};

/// Parsed title metadata.
///
/// The TMD is signed, so it goes into the archive unchanged: [`header()`](Self::header) is the
/// verbatim prefix of the input up to the end of the content chunk table, and the CP certificate
/// that the CDN appends after it is split out for the certificate section.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TitleMetadata<'data> {
	/// Signature scheme.
	pub signature: SignatureType,

	/// Title id.
	pub title_id: TitleId,

	/// Content chunk records, in table order.
	pub contents: Vec<ContentChunk>,

	header: &'data [u8],
	certificate: &'data [u8],
}

impl<'data> TitleMetadata<'data> {
	/// Parse a TMD as downloaded from the CDN.
	#[instrument(level = "debug", skip(data), fields(length = data.len()))]
	pub fn parse(data: &'data [u8]) -> Result<Self> {
		let reader = SliceReader::new("tmd", data);
		let signature = read_signature_type(&reader)?;

		// the count and table don't move with the signature size
		let count = reader.u16_be("content count", TMD_CONTENT_COUNT_OFFSET)?;
		debug!(%count, "read content count");

		let mut contents = Vec::with_capacity(count.into());
		for n in 0..usize::from(count) {
			let offset = TMD_CONTENT_CHUNKS_OFFSET + CONTENT_CHUNK_LEN * n;
			let bytes = reader.bytes(format!("content chunk {n}"), offset, CONTENT_CHUNK_LEN)?;
			let (_, chunk) = ContentChunk::from_bytes((bytes, 0))
				.map_err(|err| SourceError::from_deku(err, data, offset, CONTENT_CHUNK_LEN))?;
			trace!(%n, id = %chunk.content_id(), index = chunk.index, size = chunk.size, "read content chunk");
			contents.push(chunk);
		}

		let title_id = TitleId(reader.array("title id", signature.size() + TMD_TITLE_ID_OFFSET)?);
		let cert_offset = TMD_CONTENT_CHUNKS_OFFSET + CONTENT_CHUNK_LEN * usize::from(count);
		let header = reader.bytes("header", 0, cert_offset)?;
		let certificate = reader.bytes("cp certificate", cert_offset, CERTIFICATE_LEN)?;
		debug!(%title_id, header_len = header.len(), "parsed tmd");

		Ok(Self {
			signature,
			title_id,
			contents,
			header,
			certificate,
		})
	}

	/// The TMD as it goes in the archive: everything up to the end of the content chunk table.
	pub fn header(&self) -> &'data [u8] {
		self.header
	}

	/// The CP certificate that follows the TMD proper.
	pub fn certificate(&self) -> &'data [u8] {
		self.certificate
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{
		error::ErrorKind,
		fixtures::{chunk, tmd_bytes, TITLE_ID},
		format::TMD_CONTENT_COUNT_LEN,
	};

	#[test]
	fn parses_chunks_in_table_order() {
		let chunks = vec![chunk(0x0B, 1, 200), chunk(0x0A, 0, 100), chunk(0x0C, 9, 5)];
		let data = tmd_bytes(SignatureType::Rsa2048Sha256, &chunks);
		let tmd = TitleMetadata::parse(&data).expect("parse tmd");

		assert_eq!(tmd.signature, SignatureType::Rsa2048Sha256);
		assert_eq!(tmd.title_id, TitleId(TITLE_ID));
		assert_eq!(tmd.contents, chunks);
		assert_eq!(tmd.header().len(), 0xB04 + 3 * 0x30);
		assert_eq!(tmd.header(), &data[..0xB94]);
		assert_eq!(tmd.certificate(), &data[0xB94..0xB94 + 768]);
		assert!(tmd.certificate().iter().all(|b| *b == 0xC9));
	}

	#[test]
	fn only_the_title_id_moves_with_the_signature() {
		let chunks = vec![chunk(0x0A, 0, 100), chunk(0x0B, 1, 200)];
		for signature in [
			SignatureType::Rsa4096Sha1,
			SignatureType::Rsa4096Sha256,
			SignatureType::Rsa2048Sha1,
			SignatureType::Rsa2048Sha256,
			SignatureType::EcdsaSha1,
			SignatureType::EcdsaSha256,
		] {
			let data = tmd_bytes(signature, &chunks);
			let tmd = TitleMetadata::parse(&data).expect("parse tmd");
			assert_eq!(tmd.signature, signature);
			assert_eq!(tmd.title_id, TitleId(TITLE_ID), "{signature:?}");
			assert_eq!(tmd.contents, chunks, "{signature:?}");
			assert_eq!(tmd.header().len(), 0xB64, "{signature:?}");
		}
	}

	#[test]
	fn rejects_unknown_signature_before_anything_else() {
		let mut data = tmd_bytes(SignatureType::EcdsaSha256, &[chunk(1, 0, 1)]);
		data[..4].copy_from_slice(&0x0002_0004_u32.to_be_bytes());
		let err = TitleMetadata::parse(&data).expect_err("bad signature");
		assert_eq!(err.kind(), Some(&ErrorKind::InvalidSignatureType(0x0002_0004)));
	}

	#[test]
	fn empty_content_table_ends_at_table_start() {
		let data = tmd_bytes(SignatureType::Rsa2048Sha256, &[]);
		let tmd = TitleMetadata::parse(&data).expect("parse tmd");
		assert!(tmd.contents.is_empty());
		assert_eq!(tmd.header().len(), TMD_CONTENT_CHUNKS_OFFSET);
	}

	#[test]
	fn truncated_chunk_table_names_the_chunk() {
		let mut data = tmd_bytes(SignatureType::Rsa2048Sha256, &[chunk(1, 0, 1)]);
		// claim two chunks when there is only room for one and the certificate
		data[TMD_CONTENT_COUNT_OFFSET..TMD_CONTENT_COUNT_OFFSET + TMD_CONTENT_COUNT_LEN]
			.copy_from_slice(&40_u16.to_be_bytes());
		let err = TitleMetadata::parse(&data).expect_err("truncated");
		let Some(ErrorKind::TruncatedInput { region, .. }) = err.kind() else {
			panic!("expected truncation, got {err:?}");
		};
		assert_eq!(region, "tmd content chunk 17");
	}

	#[test]
	fn missing_certificate_is_truncation() {
		let mut data = tmd_bytes(SignatureType::Rsa2048Sha256, &[chunk(1, 0, 1)]);
		data.truncate(data.len() - 1);
		let err = TitleMetadata::parse(&data).expect_err("truncated");
		assert_eq!(
			err.kind(),
			Some(&ErrorKind::TruncatedInput {
				region: "tmd cp certificate".into(),
				end: 0xB34 + 768,
				available: 0xB34 + 767,
			})
		);
	}

	#[test]
	fn short_buffer_is_truncation() {
		let err = TitleMetadata::parse(&[0, 1]).expect_err("truncated");
		assert!(matches!(err.kind(), Some(ErrorKind::TruncatedInput { .. })));
	}
}
