/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the merge services and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod input_files;
pub mod use_cases;
