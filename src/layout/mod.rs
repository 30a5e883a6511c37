pub mod builder;
pub mod descriptor;
pub mod style;
pub mod wrap;
