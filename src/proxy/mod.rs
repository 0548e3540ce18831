// Backend relay client

pub mod client;

pub use client::HttpBackendClient;
