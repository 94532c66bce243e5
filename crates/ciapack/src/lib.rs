//! Ciapack: repackage a title's CDN components into a CIA archive.
//!
//! A title is distributed as a title metadata file (`TMD`), a ticket (`CETK`), and one file per
//! content, named by its content id in lowercase hex. This crate parses the first two, and writes
//! a CIA: a fixed header, the certificate chain, the ticket, the TMD, and then every content
//! payload in TMD order.
//!
//! The high-level entrypoint is [`build()`], which works on directories. Use [`build_to_writer()`]
//! to write to any sink, and [`decode::archive`] to read a built archive's header back.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use self::build::{build, build_to_writer, Built};

mod build;
pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod source;

#[cfg(test)]
pub(crate) mod fixtures;
