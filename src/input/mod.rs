//! Input processing module
//! Handles file detection, text extraction, job posting fetches, and input management

pub mod file_detector;
pub mod manager;
pub mod text_extractor;
pub mod web;

pub use manager::InputManager;
