//! # tag-types
//!
//! Input data model for the tag analysis engine.
//!
//! This crate defines the snapshot contract between the external
//! Scanner (which extracts tags from document markup) and the
//! analysis engine: normalized [`Tag`] values, opaque [`DocumentRef`]s
//! with an optional publication year, and the immutable
//! [`TagUsageIndex`] mapping each tag to the documents carrying it.
//!
//! The engine never mutates documents; everything downstream is a
//! pure function of one `TagUsageIndex` snapshot.

pub mod document;
pub mod error;
pub mod index;
pub mod tag;

pub use document::{DocumentRef, Year};
pub use error::TagError;
pub use index::TagUsageIndex;
pub use tag::{is_author_tag, normalize, words, Tag};
