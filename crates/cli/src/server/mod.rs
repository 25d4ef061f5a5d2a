pub mod dns;
pub mod signals;

pub use dns::start_dns_server;
pub use signals::handle_signals;
