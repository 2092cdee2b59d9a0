// Public library interface for heatmap-rs
// This allows the debug CLI tool to use the core modules

pub mod heatmap;
pub mod layout;
pub mod market;
