pub mod object;
pub mod properties;
