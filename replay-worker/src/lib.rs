pub mod batch;
pub mod cmd;
pub mod config;
pub mod emit;
pub mod identity;
pub mod parse;
pub mod pipeline;
pub mod source;
pub mod types;
