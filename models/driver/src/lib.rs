pub mod den;
pub mod entry;
pub mod section;

use bitflags::bitflags;
use std::io;
use thiserror::Error;

pub use den::{
	DentingKind,
	DriverDenting,
	NUM_CIVILIAN_ENTRIES,
	NUM_PLAYER_ENTRIES
};
pub use entry::{
	DentingEntry,
	NUM_SECTIONS
};
pub use section::DentingSection;

bitflags! {
	pub struct DecodeFlag: u32 {
		/// Fail memory and file loads that leave bytes after the last entry
		const REJECT_TRAILING = 1;
		/// Fail loads where a section lists the same vertex more than once
		const REJECT_DUPLICATES = 2;
	}
}

impl Default for DecodeFlag {
	fn default() -> Self {
		DecodeFlag::empty()
	}
}

/// Options applied when decoding denting data
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DecodeCfg {
	pub flags: DecodeFlag,
}

impl DecodeCfg {
	/// Rejects anything the game's own reader would silently accept
	pub fn strict() -> Self {
		Self {
			flags: DecodeFlag::all(),
		}
	}
}

#[derive(Debug, Error)]
pub enum DentingError {
	#[error("I/O error")]
	Io {
		source: io::Error,
	},
	#[error("Denting data ends before the last entry is complete")]
	TruncatedData,
	#[error("Index {index} out of range (length {len})")]
	OutOfRange {
		index: usize,
		len: usize,
	},
	#[error("Vertex {0} is not in the section")]
	NotFound(u16),
	#[error("Buffer too small: {needed} bytes needed, {available} available")]
	BufferTooSmall {
		needed: usize,
		available: usize,
	},
	#[error("Count too large for a 16-bit field: {0}")]
	Overflow(usize),
	#[error("{0} bytes left over after the last entry")]
	TrailingData(usize),
	#[error("Section {zone} lists vertex {vertex} more than once")]
	DuplicateVertex {
		zone: usize,
		vertex: u16,
	},
}

impl From<io::Error> for DentingError {
	fn from(e: io::Error) -> Self {
		match e.kind() {
			io::ErrorKind::UnexpectedEof => DentingError::TruncatedData,
			_ => DentingError::Io {
				source: e,
			},
		}
	}
}

/// Narrows a length to the 16-bit count stored in the file
pub(crate) fn frame_count(len: usize) -> Result<u16, DentingError> {
	u16::try_from(len).map_err(|_| DentingError::Overflow(len))
}

#[cfg(test)]
mod tests {
	use std::io;

	use super::*;

	#[test]
	fn test_io_error_mapping() {
		let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "short");
		assert!(matches!(DentingError::from(eof), DentingError::TruncatedData));

		let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
		assert!(matches!(DentingError::from(missing), DentingError::Io { .. }));
	}

	#[test]
	fn test_frame_count() {
		assert_eq!(frame_count(0).unwrap(), 0);
		assert_eq!(frame_count(65535).unwrap(), 65535);
		assert!(matches!(frame_count(65536), Err(DentingError::Overflow(65536))));
	}

	#[test]
	fn test_decode_cfg() {
		assert!(DecodeCfg::default().flags.is_empty());
		assert!(DecodeCfg::strict().flags.contains(DecodeFlag::REJECT_TRAILING | DecodeFlag::REJECT_DUPLICATES));
	}
}
