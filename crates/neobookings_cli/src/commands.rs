pub mod bench;
pub mod call;
pub mod config;
pub mod health;
pub mod serve;
pub mod tools;
