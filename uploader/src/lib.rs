//! Command line image uploader

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

/// Command line arguments
pub mod cli;

/// Loading source images from disk
pub mod images;

/// Environment configuration
pub mod types;
