use tracing::{debug, instrument};

use crate::{
	decode::{Ticket, TitleMetadata},
	error::{ErrorKind, Result},
	format::{CiaHeader, ContentIndex},
};

impl CiaHeader {
	/// Compute the header for an archive of this TMD and ticket.
	///
	/// Fails if a section is too large for its header field.
	#[instrument(level = "debug", skip(tmd, ticket), fields(title_id = %tmd.title_id))]
	pub fn build(tmd: &TitleMetadata<'_>, ticket: &Ticket<'_>) -> Result<Self> {
		let cert_size = [
			ticket.ca_certificate(),
			ticket.xs_certificate(),
			tmd.certificate(),
		]
		.iter()
		.map(|cert| cert.len())
		.sum::<usize>();

		let content_size = tmd
			.contents
			.iter()
			.try_fold(0_u64, |total, chunk| total.checked_add(chunk.size))
			.ok_or(ErrorKind::FieldOverflow("content size"))?;

		let content_index: ContentIndex = tmd.contents.iter().map(|chunk| chunk.index).collect();

		let header = Self {
			cert_size: field("certificate size", cert_size)?,
			ticket_size: field("ticket size", ticket.header().len())?,
			tmd_size: field("tmd size", tmd.header().len())?,
			content_size,
			content_index: content_index.into(),
			..Self::empty()
		};
		debug!(
			cert_size = header.cert_size,
			ticket_size = header.ticket_size,
			tmd_size = header.tmd_size,
			content_size = header.content_size,
			"computed cia header"
		);
		Ok(header)
	}
}

fn field(name: &'static str, length: usize) -> Result<u32> {
	u32::try_from(length).map_err(|_| ErrorKind::FieldOverflow(name).into())
}
