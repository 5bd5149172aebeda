/// API error types and handling
pub mod errors;
/// HTTP handlers relaying requests to the inference endpoint
pub mod handlers;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
