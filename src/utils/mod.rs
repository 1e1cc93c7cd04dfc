pub mod fs;
pub mod term;
