// Library exports for the binary and tests
pub mod color;
pub mod config;
pub mod constants;
pub mod converter;
pub mod draw;
pub mod driver;
pub mod renderer;
