//! GitHub integration: event payload shapes and the REST client.

pub mod client;
pub mod payload;

pub use client::GithubClient;
pub use payload::EventPayload;
