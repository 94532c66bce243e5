//! Offsets and lengths of the TMD, ticket, and CIA structures.
//!
//! Offsets are from the start of the respective buffer. Those marked as signature-relative must
//! be added to the signature block size given by [`SignatureType::size()`][super::SignatureType::size].

/// Length of the signature type code at the start of TMDs and tickets.
pub const SIGNATURE_TYPE_LEN: usize = 4;

/// Length of a title id.
pub const TITLE_ID_LEN: usize = 8;

/// Length of a content id.
pub const CONTENT_ID_LEN: usize = 4;

/// Length of a content hash (SHA-256).
pub const CONTENT_HASH_LEN: usize = 0x20;

/// Length of a certificate signed with RSA-2048 by an RSA-2048 issuer (CP and XS).
pub const CERTIFICATE_LEN: usize = 0x300;

/// Length of a certificate signed with RSA-4096 by the root (CA).
pub const CA_CERTIFICATE_LEN: usize = 0x400;

// TMD

/// Offset of the content count in a TMD.
///
/// This is not signature-relative.
pub const TMD_CONTENT_COUNT_OFFSET: usize = 0x1DE;

/// Length of the content count in a TMD.
pub const TMD_CONTENT_COUNT_LEN: usize = 2;

/// Offset of the content chunk records in a TMD.
///
/// This is not signature-relative.
pub const TMD_CONTENT_CHUNKS_OFFSET: usize = 0xB04;

/// Length of one content chunk record.
pub const CONTENT_CHUNK_LEN: usize = 0x30;

/// Signature-relative offset of the title id in a TMD.
pub const TMD_TITLE_ID_OFFSET: usize = 76;

// Ticket

/// Signature-relative length of the ticket data, which ends the ticket header.
pub const TICKET_DATA_LEN: usize = 528;

/// Signature-relative offset of the title id in a ticket.
pub const TICKET_TITLE_ID_OFFSET: usize = 156;

// CIA

/// Length of the CIA header, and value of its header size field.
pub const CIA_HEADER_SIZE: usize = 0x2020;

/// Length of the content index bitmap in the CIA header.
///
/// One bit per possible content index: 65536 indices.
pub const CONTENT_INDEX_LEN: usize = 0x2000;

/// CIA type field value.
pub const CIA_TYPE: u16 = 0;

/// CIA format version field value.
pub const CIA_VERSION: u16 = 0;

/// CIA sections other than contents end on a multiple of this many bytes.
pub const ALIGNMENT: u64 = 64;

// File names

/// Name of the TMD file in a CDN directory.
pub const TMD_FILENAME: &str = "TMD";

/// Name of the ticket file in a CDN directory.
pub const TICKET_FILENAME: &str = "CETK";

/// Extension of built archives.
pub const CIA_EXTENSION: &str = "cia";
