pub mod base;
pub mod configs;
pub mod sonar;
pub mod utils;

#[cfg(test)]
pub mod mock;
