pub mod number;
pub mod styles;
