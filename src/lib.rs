// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod anonymizer;
pub mod batch;
pub mod config;
pub mod export;
pub mod generator;
pub mod pipeline;
pub mod source;
