pub mod connection;
pub mod query;
pub mod search;
