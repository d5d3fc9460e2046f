pub mod check_in;
pub mod client;
