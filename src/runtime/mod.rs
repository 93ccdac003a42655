pub mod config;
pub mod context;
pub mod engine;
pub mod node;
pub mod storage;
pub mod task;
