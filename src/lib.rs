pub mod adapters;
pub mod config;
pub mod dict;
pub mod model;
pub mod util;
