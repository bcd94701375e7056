//! Client and publisher tests against a local mock server.

mod client;
