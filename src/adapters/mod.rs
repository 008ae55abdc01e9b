// Adapters layer: HTTP server and client around the converter, and the
// endpoint resolver they share.

pub mod client;
pub mod resolver;
pub mod server;
