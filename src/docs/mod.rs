//! Stored documents: chunk reads and display-label preparation.

pub mod db;
pub mod labels;

pub use labels::{Chunk, DisplayChunk, prepare_labels};
