pub mod engine;
pub mod loader;
pub mod resolver;
pub mod writer;
