pub mod adaptors;
pub mod auth;
pub mod extract;
pub mod matching;
pub mod storage;
#[cfg(test)]
pub mod testutil;
