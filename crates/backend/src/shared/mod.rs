pub mod collaborators;
pub mod config;
pub mod pivot;
