pub mod cli;
pub mod core;
pub mod docs;
pub mod session;
