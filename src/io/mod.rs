//! File access for log collections: glob expansion, transparent
//! decompression, and the line source the parser reads from.

pub mod compression;
pub mod glob;
pub mod lines;
