#![allow(dead_code)]

/// Raw A query for `domain` with the given transaction ID.
pub fn a_query(id: u16, domain: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    buf
}

pub fn rcode(response: &[u8]) -> u8 {
    response[3] & 0x0F
}

pub fn ancount(response: &[u8]) -> u16 {
    u16::from_be_bytes([response[6], response[7]])
}

pub fn answer_rdata(response: &[u8], query_len: usize) -> &[u8] {
    &response[query_len + 12..query_len + 16]
}
