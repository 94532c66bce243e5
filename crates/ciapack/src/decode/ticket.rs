use tracing::{debug, instrument};

use crate::{
	error::Result,
	format::{
		SignatureType, TitleId, CA_CERTIFICATE_LEN, CERTIFICATE_LEN, TICKET_DATA_LEN,
		TICKET_TITLE_ID_OFFSET,
	},
};

use super::{read_signature_type, SliceReader};

/// Parsed ticket.
///
/// CDN tickets carry the certificate chain after the ticket proper: first the XS certificate
/// that signed the ticket, then the CA certificate that signed both XS and CP.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ticket<'data> {
	/// Signature scheme.
	pub signature: SignatureType,

	/// Title id.
	pub title_id: TitleId,

	header: &'data [u8],
	xs_certificate: &'data [u8],
	ca_certificate: &'data [u8],
}

impl<'data> Ticket<'data> {
	/// Parse a ticket as downloaded from the CDN.
	#[instrument(level = "debug", skip(data), fields(length = data.len()))]
	pub fn parse(data: &'data [u8]) -> Result<Self> {
		let reader = SliceReader::new("ticket", data);
		let signature = read_signature_type(&reader)?;

		let header_len = signature.size() + TICKET_DATA_LEN;
		let header = reader.bytes("header", 0, header_len)?;
		let xs_certificate = reader.bytes("xs certificate", header_len, CERTIFICATE_LEN)?;
		let ca_certificate = reader.bytes(
			"ca certificate",
			header_len + CERTIFICATE_LEN,
			CA_CERTIFICATE_LEN,
		)?;

		let title_id = TitleId(
			SliceReader::new("ticket header", header)
				.array("title id", signature.size() + TICKET_TITLE_ID_OFFSET)?,
		);
		debug!(%title_id, header_len, "parsed ticket");

		Ok(Self {
			signature,
			title_id,
			header,
			xs_certificate,
			ca_certificate,
		})
	}

	/// The ticket as it goes in the archive.
	pub fn header(&self) -> &'data [u8] {
		self.header
	}

	/// The XS certificate, which signed the ticket.
	pub fn xs_certificate(&self) -> &'data [u8] {
		self.xs_certificate
	}

	/// The CA certificate, which signed the XS and CP certificates.
	pub fn ca_certificate(&self) -> &'data [u8] {
		self.ca_certificate
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{
		error::ErrorKind,
		fixtures::{ticket_bytes, TITLE_ID},
	};

	#[test]
	fn splits_header_and_certificates() {
		let data = ticket_bytes(SignatureType::Rsa2048Sha256);
		let ticket = Ticket::parse(&data).expect("parse ticket");

		assert_eq!(ticket.signature, SignatureType::Rsa2048Sha256);
		assert_eq!(ticket.title_id, TitleId(TITLE_ID));
		assert_eq!(ticket.header(), &data[..320 + 528]);
		assert_eq!(ticket.xs_certificate(), &data[848..848 + 768]);
		assert_eq!(ticket.ca_certificate(), &data[1616..1616 + 1024]);
		assert!(ticket.xs_certificate().iter().all(|b| *b == 0x58));
		assert!(ticket.ca_certificate().iter().all(|b| *b == 0xCA));
	}

	#[test]
	fn layout_shifts_with_signature() {
		for (signature, size) in [
			(SignatureType::Rsa4096Sha256, 576),
			(SignatureType::Rsa2048Sha1, 320),
			(SignatureType::EcdsaSha1, 128),
		] {
			let data = ticket_bytes(signature);
			let ticket = Ticket::parse(&data).expect("parse ticket");
			assert_eq!(ticket.title_id, TitleId(TITLE_ID), "{signature:?}");
			assert_eq!(ticket.header().len(), size + 528, "{signature:?}");
			assert_eq!(ticket.ca_certificate().len(), 1024, "{signature:?}");
		}
	}

	#[test]
	fn missing_ca_certificate_is_truncation() {
		let mut data = ticket_bytes(SignatureType::EcdsaSha256);
		data.truncate(128 + 528 + 768 + 10);
		let err = Ticket::parse(&data).expect_err("truncated");
		assert_eq!(
			err.kind(),
			Some(&ErrorKind::TruncatedInput {
				region: "ticket ca certificate".into(),
				end: 128 + 528 + 768 + 1024,
				available: 128 + 528 + 768 + 10,
			})
		);
	}

	#[test]
	fn rejects_unknown_signature() {
		let mut data = ticket_bytes(SignatureType::EcdsaSha256);
		data[..4].copy_from_slice(&[0, 0, 0, 0]);
		let err = Ticket::parse(&data).expect_err("bad signature");
		assert_eq!(err.kind(), Some(&ErrorKind::InvalidSignatureType(0)));
	}
}
