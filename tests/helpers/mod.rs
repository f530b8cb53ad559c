pub mod factories;
pub mod scripted_client;
