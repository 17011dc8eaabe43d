pub mod limit;
pub mod lookup;
pub mod parse;
