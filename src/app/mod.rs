pub mod prompter;
pub mod table;

pub use prompter::{MenuChoice, Prompter};
