#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod authorizer;
pub mod msg;
pub mod permissions;
pub mod query;
pub mod state;
pub mod voting;
