pub mod app;
pub mod backend;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod commands;
pub mod context;
pub mod local_store;
pub mod payment;
pub mod recommend;
pub mod rest;
pub mod reviews;
pub mod storage;
pub mod tracing;
pub mod types;
