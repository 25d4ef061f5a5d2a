pub mod dns_server_mock;
pub mod queries;

pub use dns_server_mock::{MockDnsServer, ServerBehavior};
pub use queries::a_query;
