//! Setup-time clue layouts and the text format they are loaded from

pub mod layout;
mod parser;

pub use layout::ClueLayout;
pub use parser::parse_clues;
