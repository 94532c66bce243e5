//! Decoder types and functions.
//!
//! [`TitleMetadata`] and [`Ticket`] are views over the raw CDN files: they borrow the input
//! buffer and only copy out the small fixed-size fields. [`archive`] goes the other way and reads
//! back what [`encode`](crate::encode) wrote.

use tracing::{debug, instrument};

use crate::{
	error::{Result, SourceError},
	format::{SignatureType, SIGNATURE_TYPE_LEN},
};

#[doc(inline)]
pub use self::reader::SliceReader;
#[doc(inline)]
pub use self::ticket::Ticket;
#[doc(inline)]
pub use self::tmd::TitleMetadata;

pub mod archive;
mod reader;
mod ticket;
mod tmd;

/// Read the signature type at the start of a TMD or ticket.
///
/// This must succeed before any signature-relative offset is computed.
#[instrument(level = "debug", skip(reader), fields(source = reader.source()))]
pub fn read_signature_type(reader: &SliceReader<'_>) -> Result<SignatureType> {
	let code = reader.u32_be("signature type", 0)?;
	let signature = SignatureType::try_from(code).map_err(|kind| {
		SourceError::from_source(kind, reader.data(), 0, SIGNATURE_TYPE_LEN)
			.with_message(format!("{}: invalid signature type 0x{code:08X}", reader.source()))
	})?;
	debug!(?signature, size = signature.size(), "read signature type");
	Ok(signature)
}
