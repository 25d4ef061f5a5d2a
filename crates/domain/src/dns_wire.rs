//! DNS wire-format handling for the interception path (RFC 1035 §4.1).
//!
//! Only what the proxy needs: pulling the QNAME out of a query and turning a
//! query into a synthetic reply. Both halves are pure and synchronous.

pub mod query_parser;
pub mod response_builder;

pub use query_parser::extract_domain;
pub use response_builder::{create_address_record, create_nxdomain, parse_ipv4_octets};

/// Fixed DNS header: ID, flags, QDCOUNT, ANCOUNT, NSCOUNT, ARCOUNT.
pub const HEADER_LEN: usize = 12;

/// Longest label allowed in a QNAME; larger length bytes are compression
/// pointers or extended label types.
pub const MAX_LABEL_LEN: usize = 63;

/// Conventional UDP DNS payload ceiling without EDNS(0).
pub const MAX_UDP_PAYLOAD: usize = 512;
