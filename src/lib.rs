//! SFC LSP library - exports modules for testing

#![warn(clippy::all, clippy::pedantic)]

pub mod capabilities;
pub mod config;
pub mod context;
pub mod documents;
pub mod registration;
pub mod sfc;
pub mod syntax;
