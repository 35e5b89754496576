// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod docker_repo;
pub mod error;
pub mod models;
pub mod probes;
pub mod routes;
pub mod version;
