//! Courier - a minimal HTTP/1.0 client and static file server
//!
//! `client` fetches one URL and saves the body to disk; `server` serves files
//! and directory listings from a root directory. They share only the protocol
//! vocabulary in `http`.

pub mod client;
pub mod config;
pub mod http;
pub mod server;
