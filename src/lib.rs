#![recursion_limit = "256"]

pub mod app;
pub mod commands;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod letter;
pub mod logging;
pub mod pages;
pub mod resume;
pub mod storage;
pub mod theme;
pub mod workspace;

pub use error::AppError;
pub use letter::{FormInputs, LetterSession};
pub use resume::{CvFile, ResumeLibrary};
