pub mod fetcher;
pub mod model;
