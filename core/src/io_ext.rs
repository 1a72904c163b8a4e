use byteorder::{
	LE,
	ReadBytesExt,
	WriteBytesExt
};

use std::io::{
	Read,
	Result,
	Write
};

pub trait ReadBinExt: Read {
	/// Reads exactly `count` bytes
	#[inline]
	fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
		let mut bytes = vec![0; count];
		self.read_exact(&mut bytes)?;

		Ok(bytes)
	}

	/// Reads `count` little endian 16-bit integers
	#[inline]
	fn read_u16_list_le(&mut self, count: usize) -> Result<Vec<u16>> {
		let mut list = vec![0; count];
		self.read_u16_into::<LE>(&mut list)?;

		Ok(list)
	}

	/// Reads a list of little endian 16-bit integers prefixed by its 16-bit length
	#[inline]
	fn read_counted_u16_list_le(&mut self) -> Result<Vec<u16>> {
		let count = self.read_u16::<LE>()? as usize;
		self.read_u16_list_le(count)
	}
}

impl<R> ReadBinExt for R
where
	R: Read + ?Sized,
{
}

pub trait WriteBinExt: Write {
	/// Writes every integer of `list` as little endian, without a length prefix
	#[inline]
	fn write_u16_list_le(&mut self, list: &[u16]) -> Result<()> {
		for v in list.iter() {
			self.write_u16::<LE>(*v)?;
		}

		Ok(())
	}
}

impl<W> WriteBinExt for W
where
	W: Write + ?Sized,
{
}
