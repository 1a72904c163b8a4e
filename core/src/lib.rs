#[cfg(feature = "bit_ext")]
pub mod bit_ext;

#[cfg(feature = "io_ext")]
pub mod io_ext;

/// Returns the number of bytes needed to pack `count` items at `per_byte` items per byte
pub const fn packed_len(count: usize, per_byte: usize) -> usize {
	count.div_ceil(per_byte)
}

#[test]
fn test_packed_len() {
	assert_eq!(packed_len(0, 8), 0);
	assert_eq!(packed_len(1, 8), 1);
	assert_eq!(packed_len(8, 8), 1);
	assert_eq!(packed_len(9, 8), 2);
	assert_eq!(packed_len(3, 2), 2);
	assert_eq!(packed_len(4, 2), 2);
	assert_eq!(packed_len(usize::MAX, 8), usize::MAX / 8 + 1);
	assert_eq!(packed_len(usize::MAX, 2), usize::MAX / 2 + 1);
}
