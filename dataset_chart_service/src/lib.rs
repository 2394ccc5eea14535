pub mod common;
pub mod external_deps;
pub mod prelude;

pub mod controller;
pub mod dto;
pub mod enums;
pub mod env_configuration;
pub mod errors;
pub mod model;
pub mod renderer;
pub mod repository;
pub mod service;
pub mod traits;
pub mod utils_modules;
