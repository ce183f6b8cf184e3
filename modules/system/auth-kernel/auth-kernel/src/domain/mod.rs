pub mod resolver;
pub mod service;
