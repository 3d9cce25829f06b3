// Core data models for TaskFlow

pub mod task;

pub use task::*;
