//! Business logic services

pub mod cafe_directory;

pub use cafe_directory::CafeDirectory;
