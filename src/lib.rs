#![warn(missing_docs, clippy::pedantic, clippy::perf)]
#![doc = include_str!(r"../README.md")]

pub mod banner;
pub mod parser;
pub mod roll;
pub mod summary;
#[cfg(feature = "rendering")]
pub mod renderer;
