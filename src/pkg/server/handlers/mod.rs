pub mod auth;
pub mod chat;
pub mod jobs;
pub mod probes;
pub mod profile;
pub mod proposals;
pub mod resume;
