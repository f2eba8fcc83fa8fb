pub mod settings;
pub mod workspace;
