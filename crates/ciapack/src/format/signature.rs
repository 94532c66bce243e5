use crate::error::ErrorKind;

/// Signature scheme of a TMD or ticket.
///
/// The signed structure starts with a big-endian type code, followed by the signature and
/// padding. Everything signature-relative in those structures is offset by [`size()`](Self::size).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u32)]
pub enum SignatureType {
	/// RSA-4096 over SHA-1.
	Rsa4096Sha1 = 0x0001_0000,

	/// RSA-2048 over SHA-1.
	Rsa2048Sha1 = 0x0001_0001,

	/// ECDSA over SHA-1.
	EcdsaSha1 = 0x0001_0002,

	/// RSA-4096 over SHA-256.
	Rsa4096Sha256 = 0x0001_0003,

	/// RSA-2048 over SHA-256.
	Rsa2048Sha256 = 0x0001_0004,

	/// ECDSA over SHA-256.
	EcdsaSha256 = 0x0001_0005,
}

impl SignatureType {
	/// Length in bytes of the signature block: type code, signature, and padding.
	pub const fn size(self) -> usize {
		match self {
			Self::Rsa4096Sha1 | Self::Rsa4096Sha256 => 0x240,
			Self::Rsa2048Sha1 | Self::Rsa2048Sha256 => 0x140,
			Self::EcdsaSha1 | Self::EcdsaSha256 => 0x80,
		}
	}

	/// The type code as it appears on the wire (big-endian).
	pub const fn code(self) -> u32 {
		self as u32
	}
}

impl TryFrom<u32> for SignatureType {
	type Error = ErrorKind;

	fn try_from(code: u32) -> Result<Self, Self::Error> {
		Ok(match code {
			0x0001_0000 => Self::Rsa4096Sha1,
			0x0001_0001 => Self::Rsa2048Sha1,
			0x0001_0002 => Self::EcdsaSha1,
			0x0001_0003 => Self::Rsa4096Sha256,
			0x0001_0004 => Self::Rsa2048Sha256,
			0x0001_0005 => Self::EcdsaSha256,
			other => return Err(ErrorKind::InvalidSignatureType(other)),
		})
	}
}
