pub mod confirm;
pub mod limit;
pub mod parse;
pub mod records;
