//! CLI 명령어 구현

pub mod health;
pub mod policy;
pub mod route;
pub mod token;
