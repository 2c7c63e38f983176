//! Marketplace REST gateway over a remote document store.

pub mod api;
pub mod config;
pub mod repository;
pub mod store;
