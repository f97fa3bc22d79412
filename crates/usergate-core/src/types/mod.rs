//! Core type definitions used across the Usergate workspace.

pub mod id;

pub use id::*;
