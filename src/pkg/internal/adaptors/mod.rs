pub mod chat;
pub mod jobs;
pub mod proposals;
pub mod resumes;
pub mod users;
