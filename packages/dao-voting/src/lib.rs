#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod proposal;
pub mod status;
pub mod threshold;
pub mod voting;
