pub mod dispatcher;
pub mod handler;
pub mod listener;
mod routes;

#[cfg(test)]
mod routes_test;
