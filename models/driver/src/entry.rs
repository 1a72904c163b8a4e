use byteorder::{
	LE,
	ReadBytesExt,
	WriteBytesExt
};

use dle_core::{
	bit_ext::{
		get_flag,
		get_nibble,
		set_flag,
		set_nibble,
		FLAGS_PER_BYTE,
		NIBBLES_PER_BYTE
	},
	io_ext::ReadBinExt,
	packed_len
};

use crate::{
	DecodeCfg,
	DecodeFlag,
	DentingError,
	DentingSection,
	frame_count
};

/// Deformation zones per vehicle
pub const NUM_SECTIONS: usize = 6;

/// Denting data of a single vehicle: six vertex sections plus two per-face tables.
///
/// Shininess is stored one bit per face, face 0 in the least significant bit of the first byte.
/// Texture indices are stored one nibble per face, even faces in the low nibble.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DentingEntry {
	sections: [DentingSection; NUM_SECTIONS],
	shininess: Vec<u8>,
	num_shininess_faces: usize,
	texture_indices: Vec<u8>,
	num_texture_faces: usize,
}

impl DentingEntry {
	pub fn new() -> DentingEntry {
		DentingEntry::default()
	}

	pub fn clear(&mut self) {
		*self = DentingEntry::new();
	}

	pub fn sections(&self) -> &[DentingSection; NUM_SECTIONS] {
		&self.sections
	}

	pub fn denting_section(&self, zone: usize) -> Result<&DentingSection, DentingError> {
		self.sections.get(zone).ok_or(DentingError::OutOfRange {
			index: zone,
			len: NUM_SECTIONS,
		})
	}

	pub fn denting_section_mut(&mut self, zone: usize) -> Result<&mut DentingSection, DentingError> {
		self.sections.get_mut(zone).ok_or(DentingError::OutOfRange {
			index: zone,
			len: NUM_SECTIONS,
		})
	}

	pub fn num_shininess_faces(&self) -> usize {
		self.num_shininess_faces
	}

	/// Replaces the shininess table with the first `ceil(num_faces / 8)` bytes of `data`
	pub fn set_shininess_data(&mut self, data: &[u8], num_faces: usize) -> Result<(), DentingError> {
		let len = packed_len(num_faces, FLAGS_PER_BYTE);
		if data.len() < len {
			return Err(DentingError::TruncatedData);
		}

		self.shininess = data[..len].to_vec();
		self.num_shininess_faces = num_faces;
		Ok(())
	}

	pub fn shininess_data(&self) -> &[u8] {
		&self.shininess
	}

	pub fn face_is_shiny(&self, face_idx: usize) -> Result<bool, DentingError> {
		let err = self.shininess_range_error(face_idx);
		if face_idx >= self.num_shininess_faces {
			return Err(err);
		}

		get_flag(&self.shininess, face_idx).ok_or(err)
	}

	pub fn set_face_shininess(&mut self, face_idx: usize, shiny: bool) -> Result<(), DentingError> {
		if face_idx >= self.num_shininess_faces
			|| !set_flag(&mut self.shininess, face_idx, shiny)
		{
			return Err(self.shininess_range_error(face_idx));
		}

		Ok(())
	}

	fn shininess_range_error(&self, face_idx: usize) -> DentingError {
		DentingError::OutOfRange {
			index: face_idx,
			len: self.num_shininess_faces,
		}
	}

	pub fn num_texture_index_faces(&self) -> usize {
		self.num_texture_faces
	}

	/// Replaces the texture index table with the first `ceil(num_faces / 2)` bytes of `data`
	pub fn set_texture_index_data(&mut self, data: &[u8], num_faces: usize) -> Result<(), DentingError> {
		let len = packed_len(num_faces, NIBBLES_PER_BYTE);
		if data.len() < len {
			return Err(DentingError::TruncatedData);
		}

		self.texture_indices = data[..len].to_vec();
		self.num_texture_faces = num_faces;
		Ok(())
	}

	pub fn texture_index_data(&self) -> &[u8] {
		&self.texture_indices
	}

	pub fn face_texture_index(&self, face_idx: usize) -> Result<u8, DentingError> {
		let err = self.texture_range_error(face_idx);
		if face_idx >= self.num_texture_faces {
			return Err(err);
		}

		get_nibble(&self.texture_indices, face_idx).ok_or(err)
	}

	/// Stores the low 4 bits of `tex_idx`; higher bits are dropped
	pub fn set_face_texture_index(&mut self, face_idx: usize, tex_idx: u8) -> Result<(), DentingError> {
		if face_idx >= self.num_texture_faces
			|| !set_nibble(&mut self.texture_indices, face_idx, tex_idx)
		{
			return Err(self.texture_range_error(face_idx));
		}

		Ok(())
	}

	fn texture_range_error(&self, face_idx: usize) -> DentingError {
		DentingError::OutOfRange {
			index: face_idx,
			len: self.num_texture_faces,
		}
	}

	/// Size of this entry in the file
	pub fn encoded_len(&self) -> usize {
		self.sections.iter().map(|s| s.encoded_len()).sum::<usize>()
			+ 2 + self.shininess.len()
			+ 2 + self.texture_indices.len()
	}

	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R, cfg: &DecodeCfg) -> Result<DentingEntry, DentingError>
	where
		R: ReadBytesExt,
	{
		let mut entry = DentingEntry::new();

		for (zone, section) in entry.sections.iter_mut().enumerate() {
			*section = DentingSection::read(buf)?;

			if cfg.flags.contains(DecodeFlag::REJECT_DUPLICATES) {
				if let Some(vertex) = section.first_duplicate() {
					return Err(DentingError::DuplicateVertex {
						zone: zone,
						vertex: vertex,
					});
				}
			}
		}

		let num_shiny = buf.read_u16::<LE>()? as usize;
		entry.shininess = buf.read_bytes(packed_len(num_shiny, FLAGS_PER_BYTE))?;
		entry.num_shininess_faces = num_shiny;

		let num_tex = buf.read_u16::<LE>()? as usize;
		entry.texture_indices = buf.read_bytes(packed_len(num_tex, NIBBLES_PER_BYTE))?;
		entry.num_texture_faces = num_tex;

		Ok(entry)
	}

	#[cfg(feature = "export")]
	pub fn write<W>(&self, buf: &mut W) -> Result<(), DentingError>
	where
		W: WriteBytesExt,
	{
		for section in self.sections.iter() {
			section.write(buf)?;
		}

		buf.write_u16::<LE>(frame_count(self.num_shininess_faces)?)?;
		buf.write_all(&self.shininess)?;

		buf.write_u16::<LE>(frame_count(self.num_texture_faces)?)?;
		buf.write_all(&self.texture_indices)?;

		Ok(())
	}
}
