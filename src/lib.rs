pub mod decoder;
pub mod error;
pub mod fetch;
pub mod runtime;
