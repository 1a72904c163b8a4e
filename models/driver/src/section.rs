use bitvec::prelude::*;

use byteorder::{
	LE,
	ReadBytesExt,
	WriteBytesExt
};

use dle_core::io_ext::{
	ReadBinExt,
	WriteBinExt
};

use crate::{
	DentingError,
	frame_count
};

/// Vertex indices of one deformation zone, in file order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DentingSection {
	vertices: Vec<u16>,
}

impl DentingSection {
	pub fn new() -> DentingSection {
		DentingSection {
			vertices: vec![],
		}
	}

	pub fn num_vertices(&self) -> usize {
		self.vertices.len()
	}

	pub fn data(&self) -> &[u16] {
		&self.vertices
	}

	/// Replaces the whole section with a copy of `verts`.
	/// Indices are not checked against any mesh.
	pub fn set_data(&mut self, verts: &[u16]) {
		self.vertices.clear();
		self.vertices.extend_from_slice(verts);
	}

	pub fn get_vertex(&self, idx: usize) -> Result<u16, DentingError> {
		self.vertices.get(idx).copied().ok_or(DentingError::OutOfRange {
			index: idx,
			len: self.vertices.len(),
		})
	}

	pub fn contains(&self, vidx: u16) -> bool {
		self.vertices.contains(&vidx)
	}

	/// Appends a vertex unless it is already present. Returns whether it was added.
	pub fn add_vertex(&mut self, vidx: u16) -> bool {
		if self.contains(vidx) {
			return false;
		}

		self.vertices.push(vidx);
		true
	}

	/// Removes the first occurrence of a vertex, keeping the order of the rest
	pub fn remove_vertex(&mut self, vidx: u16) -> Result<(), DentingError> {
		let pos = self.vertices.iter()
			.position(|v| *v == vidx)
			.ok_or(DentingError::NotFound(vidx))?;
		self.vertices.remove(pos);

		Ok(())
	}

	pub fn clear(&mut self) {
		self.vertices.clear();
	}

	/// Returns the first vertex listed more than once, if any
	pub fn first_duplicate(&self) -> Option<u16> {
		let mut seen = bitvec![u64, Lsb0; 0; 1 << 16];

		self.vertices.iter()
			.find(|v| seen.replace(**v as usize, true))
			.copied()
	}

	/// Size of this section in the file, count field included
	pub fn encoded_len(&self) -> usize {
		2 + self.vertices.len() * 2
	}

	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R) -> Result<DentingSection, DentingError>
	where
		R: ReadBytesExt,
	{
		Ok(DentingSection {
			vertices: buf.read_counted_u16_list_le()?,
		})
	}

	#[cfg(feature = "export")]
	pub fn write<W>(&self, buf: &mut W) -> Result<(), DentingError>
	where
		W: WriteBytesExt,
	{
		buf.write_u16::<LE>(frame_count(self.vertices.len())?)?;
		buf.write_u16_list_le(&self.vertices)?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_set_data() {
		let mut section = DentingSection::new();
		section.set_data(&[10, 11, 12]);
		assert_eq!(section.num_vertices(), 3);
		assert_eq!(section.data(), &[10, 11, 12]);

		section.set_data(&[]);
		assert_eq!(section.num_vertices(), 0);
		assert!(section.data().is_empty());
	}

	#[test]
	fn test_get_vertex() {
		let mut section = DentingSection::new();
		section.set_data(&[7, 3]);
		assert_eq!(section.get_vertex(1).unwrap(), 3);
		assert!(matches!(section.get_vertex(2), Err(DentingError::OutOfRange { index: 2, len: 2 })));
	}

	#[test]
	fn test_add_vertex() {
		let mut section = DentingSection::new();
		assert!(section.add_vertex(5));
		assert!(section.add_vertex(2));
		assert!(!section.add_vertex(5));
		assert_eq!(section.data(), &[5, 2]);
		assert_eq!(section.num_vertices(), 2);
	}

	#[test]
	fn test_remove_vertex() {
		let mut section = DentingSection::new();
		section.set_data(&[1, 2, 3, 4]);
		section.remove_vertex(2).unwrap();
		assert_eq!(section.data(), &[1, 3, 4]);

		assert!(matches!(section.remove_vertex(9), Err(DentingError::NotFound(9))));
		assert_eq!(section.data(), &[1, 3, 4]);

		section.remove_vertex(4).unwrap();
		section.remove_vertex(1).unwrap();
		section.remove_vertex(3).unwrap();
		assert_eq!(section.num_vertices(), 0);
	}

	#[test]
	fn test_first_duplicate() {
		let mut section = DentingSection::new();
		section.set_data(&[4, 8, 15]);
		assert_eq!(section.first_duplicate(), None);

		section.set_data(&[4, 8, 15, 8, 4]);
		assert_eq!(section.first_duplicate(), Some(8));

		section.set_data(&[0, 65535, 1, 65535]);
		assert_eq!(section.first_duplicate(), Some(65535));

		// a full section of distinct indices
		let all: Vec<u16> = (0..=u16::MAX).rev().collect();
		section.set_data(&all);
		assert_eq!(section.first_duplicate(), None);
		section.add_vertex(7);
		assert_eq!(section.num_vertices(), 65536);
	}

	#[cfg(all(feature = "import", feature = "export"))]
	#[test]
	fn test_read_write() {
		let mut data = &b"\x03\x00\x0a\x00\x0b\x00\x0c\x00\xff"[..];
		let section = DentingSection::read(&mut data).unwrap();
		assert_eq!(section.data(), &[10, 11, 12]);
		assert_eq!(data, &[0xFF]);

		let mut out = vec![];
		section.write(&mut out).unwrap();
		assert_eq!(out, b"\x03\x00\x0a\x00\x0b\x00\x0c\x00");
		assert_eq!(out.len(), section.encoded_len());
	}

	#[cfg(feature = "import")]
	#[test]
	fn test_read_truncated() {
		let mut data = &b"\x02\x00\x0a"[..];
		assert!(matches!(DentingSection::read(&mut data), Err(DentingError::TruncatedData)));
	}

	#[cfg(feature = "export")]
	#[test]
	fn test_write_overflow() {
		let mut section = DentingSection::new();
		section.set_data(&vec![0; 65536]);

		let mut out = vec![];
		assert!(matches!(section.write(&mut out), Err(DentingError::Overflow(65536))));
	}
}
