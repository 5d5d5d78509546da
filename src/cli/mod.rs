pub mod database;
pub mod owner;
pub mod plan;
pub mod server;
