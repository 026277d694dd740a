//! # Utilities

pub mod regex;
