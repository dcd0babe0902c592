pub mod public_files;

pub use public_files::hide_incomplete_uploads;
