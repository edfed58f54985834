#[path = "../fixtures.rs"]
mod fixtures;

mod binary;
