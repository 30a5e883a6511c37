pub mod composite;
pub mod engine;
pub mod mask;
pub mod text;
