pub mod asset_path;
pub mod environment;
pub mod global_file;
