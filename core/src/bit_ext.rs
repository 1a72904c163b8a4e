use bitvec::prelude::*;

pub const FLAGS_PER_BYTE: usize = 8;
pub const NIBBLES_PER_BYTE: usize = 2;

/// Reads flag `idx` of a packed table, least significant bit first
pub fn get_flag(bytes: &[u8], idx: usize) -> Option<bool> {
	bytes.view_bits::<Lsb0>().get(idx).map(|bit| *bit)
}

/// Sets flag `idx` of a packed table, leaving every other bit untouched.
/// Returns `false` if the byte holding it is not present.
pub fn set_flag(bytes: &mut [u8], idx: usize, value: bool) -> bool {
	let bits = bytes.view_bits_mut::<Lsb0>();

	if idx < bits.len() {
		bits.set(idx, value);
		true
	} else {
		false
	}
}

/// Maps a nibble index to its byte index and bit shift. Even indices use the low nibble.
pub const fn nibble_position(idx: usize) -> (usize, u32) {
	(idx / NIBBLES_PER_BYTE, ((idx % NIBBLES_PER_BYTE) * 4) as u32)
}

/// Reads the nibble at `idx`, if the byte holding it is present
pub fn get_nibble(bytes: &[u8], idx: usize) -> Option<u8> {
	let (byte, shift) = nibble_position(idx);

	bytes.get(byte).map(|b| (b >> shift) & 0x0F)
}

/// Writes the low 4 bits of `value` into the nibble at `idx`, leaving its neighbour untouched.
/// Returns `false` if the byte holding it is not present.
pub fn set_nibble(bytes: &mut [u8], idx: usize, value: u8) -> bool {
	let (byte, shift) = nibble_position(idx);

	if let Some(b) = bytes.get_mut(byte) {
		*b = (*b & !(0x0F << shift)) | ((value & 0x0F) << shift);
		true
	} else {
		false
	}
}
