use byteorder::{
	ReadBytesExt,
	WriteBytesExt
};

use log::{
	debug,
	warn
};

use std::{
	fmt::{
		Display,
		Formatter,
		self
	},
	fs,
	path::Path
};

use crate::{
	DecodeCfg,
	DecodeFlag,
	DentingEntry,
	DentingError
};

/// Civilian vehicle classes in a denting file
pub const NUM_CIVILIAN_ENTRIES: usize = 11;
/// Playable vehicles in a denting file
pub const NUM_PLAYER_ENTRIES: usize = 18;

/// The two denting files of a level share a layout and differ only in entry count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DentingKind {
	Civilian,
	Player,
}

impl DentingKind {
	pub const fn num_entries(&self) -> usize {
		match self {
			DentingKind::Civilian => NUM_CIVILIAN_ENTRIES,
			DentingKind::Player => NUM_PLAYER_ENTRIES,
		}
	}
}

impl Display for DentingKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			DentingKind::Civilian => write!(f, "civilian"),
			DentingKind::Player => write!(f, "player"),
		}
	}
}

/// A fully decoded group, held aside until it can replace the current one
#[cfg(feature = "import")]
enum Decoded {
	Civilian([DentingEntry; NUM_CIVILIAN_ENTRIES]),
	Player([DentingEntry; NUM_PLAYER_ENTRIES]),
}

#[cfg(feature = "import")]
fn read_entries<R, const N: usize>(buf: &mut R, cfg: &DecodeCfg) -> Result<[DentingEntry; N], DentingError>
where
	R: ReadBytesExt,
{
	let mut entries: [DentingEntry; N] = std::array::from_fn(|_| DentingEntry::new());

	for entry in entries.iter_mut() {
		*entry = DentingEntry::read(buf, cfg)?;
	}

	Ok(entries)
}

/// Civilian and player denting of one level
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverDenting {
	pub cfg: DecodeCfg,
	civilian: [DentingEntry; NUM_CIVILIAN_ENTRIES],
	player: [DentingEntry; NUM_PLAYER_ENTRIES],
}

impl DriverDenting {
	pub fn new() -> DriverDenting {
		DriverDenting::default()
	}

	pub fn with_cfg(cfg: DecodeCfg) -> DriverDenting {
		DriverDenting {
			cfg: cfg,
			..DriverDenting::default()
		}
	}

	pub fn entries(&self, kind: DentingKind) -> &[DentingEntry] {
		match kind {
			DentingKind::Civilian => &self.civilian,
			DentingKind::Player => &self.player,
		}
	}

	pub fn entries_mut(&mut self, kind: DentingKind) -> &mut [DentingEntry] {
		match kind {
			DentingKind::Civilian => &mut self.civilian,
			DentingKind::Player => &mut self.player,
		}
	}

	pub fn entry(&self, kind: DentingKind, idx: usize) -> Result<&DentingEntry, DentingError> {
		self.entries(kind).get(idx).ok_or(DentingError::OutOfRange {
			index: idx,
			len: kind.num_entries(),
		})
	}

	pub fn entry_mut(&mut self, kind: DentingKind, idx: usize) -> Result<&mut DentingEntry, DentingError> {
		self.entries_mut(kind).get_mut(idx).ok_or(DentingError::OutOfRange {
			index: idx,
			len: kind.num_entries(),
		})
	}

	pub fn civilian_denting(&self, idx: usize) -> Result<&DentingEntry, DentingError> {
		self.entry(DentingKind::Civilian, idx)
	}

	pub fn civilian_denting_mut(&mut self, idx: usize) -> Result<&mut DentingEntry, DentingError> {
		self.entry_mut(DentingKind::Civilian, idx)
	}

	pub fn player_denting(&self, idx: usize) -> Result<&DentingEntry, DentingError> {
		self.entry(DentingKind::Player, idx)
	}

	pub fn player_denting_mut(&mut self, idx: usize) -> Result<&mut DentingEntry, DentingError> {
		self.entry_mut(DentingKind::Player, idx)
	}

	/// Exact size of a group once saved
	pub fn encoded_len(&self, kind: DentingKind) -> usize {
		self.entries(kind).iter().map(|e| e.encoded_len()).sum()
	}

	pub fn civilian_denting_len(&self) -> usize {
		self.encoded_len(DentingKind::Civilian)
	}

	pub fn player_denting_len(&self) -> usize {
		self.encoded_len(DentingKind::Player)
	}

	#[cfg(feature = "import")]
	fn decode<R>(&self, kind: DentingKind, buf: &mut R) -> Result<Decoded, DentingError>
	where
		R: ReadBytesExt,
	{
		Ok(match kind {
			DentingKind::Civilian => Decoded::Civilian(read_entries(buf, &self.cfg)?),
			DentingKind::Player => Decoded::Player(read_entries(buf, &self.cfg)?),
		})
	}

	#[cfg(feature = "import")]
	fn install(&mut self, decoded: Decoded) {
		match decoded {
			Decoded::Civilian(entries) => self.civilian = entries,
			Decoded::Player(entries) => self.player = entries,
		}
	}

	/// Replaces a group with entries read from `buf`.
	/// The current entries are kept if reading fails.
	#[cfg(feature = "import")]
	pub fn load_from_reader<R>(&mut self, kind: DentingKind, buf: &mut R) -> Result<(), DentingError>
	where
		R: ReadBytesExt,
	{
		let decoded = self.decode(kind, buf)?;
		self.install(decoded);

		debug!("Loaded {} {} denting entries", kind.num_entries(), kind);
		Ok(())
	}

	/// Replaces a group with entries decoded from a byte buffer.
	/// The current entries are kept if decoding fails.
	#[cfg(feature = "import")]
	pub fn load_from_memory(&mut self, kind: DentingKind, data: &[u8]) -> Result<(), DentingError> {
		let mut cursor = data;
		let decoded = self.decode(kind, &mut cursor)?;

		if !cursor.is_empty() {
			if self.cfg.flags.contains(DecodeFlag::REJECT_TRAILING) {
				return Err(DentingError::TrailingData(cursor.len()));
			}

			warn!("Ignoring {} bytes after {} denting data", cursor.len(), kind);
		}

		self.install(decoded);

		debug!("Loaded {} {} denting entries from {} bytes", kind.num_entries(), kind,
			data.len() - cursor.len());
		Ok(())
	}

	/// Reads a whole denting file and replaces a group with its entries
	#[cfg(feature = "import")]
	pub fn load_from_path<P>(&mut self, kind: DentingKind, path: P) -> Result<(), DentingError>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		let data = fs::read(path)?;

		debug!("Read {} bytes from {}", data.len(), path.display());
		self.load_from_memory(kind, &data)
	}

	#[cfg(feature = "export")]
	pub fn save_to_writer<W>(&self, kind: DentingKind, buf: &mut W) -> Result<(), DentingError>
	where
		W: WriteBytesExt,
	{
		for entry in self.entries(kind).iter() {
			entry.write(buf)?;
		}

		debug!("Saved {} {} denting entries", kind.num_entries(), kind);
		Ok(())
	}

	/// Encodes a group into a new buffer of exactly [`DriverDenting::encoded_len`] bytes
	#[cfg(feature = "export")]
	pub fn encode(&self, kind: DentingKind) -> Result<Vec<u8>, DentingError> {
		let mut data = Vec::with_capacity(self.encoded_len(kind));
		self.save_to_writer(kind, &mut data)?;

		Ok(data)
	}

	/// Encodes a group into the front of `out`, returning the number of bytes written.
	/// Nothing is written if `out` is too small.
	#[cfg(feature = "export")]
	pub fn save_to_memory(&self, kind: DentingKind, out: &mut [u8]) -> Result<usize, DentingError> {
		let needed = self.encoded_len(kind);
		if out.len() < needed {
			return Err(DentingError::BufferTooSmall {
				needed: needed,
				available: out.len(),
			});
		}

		let data = self.encode(kind)?;
		out[..data.len()].copy_from_slice(&data);

		Ok(data.len())
	}

	/// Writes a group to a file, replacing it.
	/// The file is only touched once the whole group has been encoded.
	#[cfg(feature = "export")]
	pub fn save_to_path<P>(&self, kind: DentingKind, path: P) -> Result<(), DentingError>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		let data = self.encode(kind)?;
		fs::write(path, &data)?;

		debug!("Wrote {} bytes to {}", data.len(), path.display());
		Ok(())
	}

	#[cfg(feature = "import")]
	pub fn load_civilian_denting_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DentingError> {
		self.load_from_path(DentingKind::Civilian, path)
	}

	#[cfg(feature = "import")]
	pub fn load_civilian_denting_from_reader<R: ReadBytesExt>(&mut self, buf: &mut R) -> Result<(), DentingError> {
		self.load_from_reader(DentingKind::Civilian, buf)
	}

	#[cfg(feature = "import")]
	pub fn load_civilian_denting_from_memory(&mut self, data: &[u8]) -> Result<(), DentingError> {
		self.load_from_memory(DentingKind::Civilian, data)
	}

	#[cfg(feature = "import")]
	pub fn load_player_denting_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), DentingError> {
		self.load_from_path(DentingKind::Player, path)
	}

	#[cfg(feature = "import")]
	pub fn load_player_denting_from_reader<R: ReadBytesExt>(&mut self, buf: &mut R) -> Result<(), DentingError> {
		self.load_from_reader(DentingKind::Player, buf)
	}

	#[cfg(feature = "import")]
	pub fn load_player_denting_from_memory(&mut self, data: &[u8]) -> Result<(), DentingError> {
		self.load_from_memory(DentingKind::Player, data)
	}

	#[cfg(feature = "export")]
	pub fn save_civilian_denting_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), DentingError> {
		self.save_to_path(DentingKind::Civilian, path)
	}

	#[cfg(feature = "export")]
	pub fn save_civilian_denting_to_writer<W: WriteBytesExt>(&self, buf: &mut W) -> Result<(), DentingError> {
		self.save_to_writer(DentingKind::Civilian, buf)
	}

	#[cfg(feature = "export")]
	pub fn save_civilian_denting_to_memory(&self, out: &mut [u8]) -> Result<usize, DentingError> {
		self.save_to_memory(DentingKind::Civilian, out)
	}

	#[cfg(feature = "export")]
	pub fn save_player_denting_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), DentingError> {
		self.save_to_path(DentingKind::Player, path)
	}

	#[cfg(feature = "export")]
	pub fn save_player_denting_to_writer<W: WriteBytesExt>(&self, buf: &mut W) -> Result<(), DentingError> {
		self.save_to_writer(DentingKind::Player, buf)
	}

	#[cfg(feature = "export")]
	pub fn save_player_denting_to_memory(&self, out: &mut [u8]) -> Result<usize, DentingError> {
		self.save_to_memory(DentingKind::Player, out)
	}
}
