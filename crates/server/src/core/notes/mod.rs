//! Notes owned by the authenticated caller

pub mod handlers;

pub use handlers::{create_note, list_notes};
