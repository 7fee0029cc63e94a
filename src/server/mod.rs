// Server module entry point
// Listener creation, the accept loop, per-connection tasks and shutdown signals

pub mod accept_loop;
pub mod connection;
pub mod listener;
pub mod signal;

// Re-export commonly used items
pub use accept_loop::start_server_loop;
pub use listener::create_listener;
pub use signal::shutdown_signal;
