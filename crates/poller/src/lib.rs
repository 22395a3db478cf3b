pub mod client;
pub mod poller;
pub mod report;
pub mod validate;
