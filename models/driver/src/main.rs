use std::{
	env,
	process
};

use dle_models_driver::{
	DentingError,
	DentingKind,
	DriverDenting
};

fn main() -> Result<(), DentingError> {
	env_logger::init();

	let args: Vec<String> = env::args().collect();
	if args.len() != 3 {
		eprintln!("usage: den-dump <civilian|player> <file>");
		process::exit(2);
	}

	let kind = match args[1].as_str() {
		"civilian" => DentingKind::Civilian,
		"player" => DentingKind::Player,
		other => {
			eprintln!("unknown denting kind: {}", other);
			process::exit(2);
		}
	};

	let mut denting = DriverDenting::new();
	denting.load_from_path(kind, &args[2])?;

	for (i, entry) in denting.entries(kind).iter().enumerate() {
		println!("{} entry {}:", kind, i);

		for (zone, section) in entry.sections().iter().enumerate() {
			println!("  section {}: {:?}", zone, section.data());
		}

		println!("  shininess ({} faces): {:02x?}", entry.num_shininess_faces(), entry.shininess_data());
		println!("  texture index ({} faces): {:02x?}", entry.num_texture_index_faces(),
			entry.texture_index_data());
	}

	Ok(())
}
