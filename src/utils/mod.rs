pub mod client_cache;
