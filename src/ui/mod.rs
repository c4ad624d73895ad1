pub mod messages;
pub mod overlay;
pub mod view;
