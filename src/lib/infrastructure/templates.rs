//! Template storage implementations

pub mod fs;
