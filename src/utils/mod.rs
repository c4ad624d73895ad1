pub mod colors;
pub mod formatting;
pub mod input;
pub mod path;

pub use formatting::format_hms;
