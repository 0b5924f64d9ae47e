/// JSON loaders for reactor configurations and mechanisms
pub mod load_from_file;
