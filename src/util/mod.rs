// Utility Module
// Configuration, ciphertext encodings and file access

pub mod config;
pub mod encoding;
pub mod file_ops;
