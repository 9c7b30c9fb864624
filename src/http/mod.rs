pub mod handler;
pub mod response;
