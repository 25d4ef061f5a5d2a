use super::HEADER_LEN;
use bytes::{BufMut, Bytes, BytesMut};

/// TTL stamped on every synthesized address record.
pub const ANSWER_TTL: u32 = 300;

const TYPE_A: u16 = 0x0001;
const CLASS_IN: u16 = 0x0001;
const QNAME_POINTER: [u8; 2] = [0xC0, 0x0C];
const ANSWER_RECORD_LEN: usize = 16;

// QR=1 RD=1 / RA=1
const FLAGS_ANSWER: [u8; 2] = [0x81, 0x80];
// QR=1 AA=1 RD=1 / RA=1 RCODE=3
const FLAGS_NXDOMAIN: [u8; 2] = [0x85, 0x83];

const ANCOUNT_OFFSET: usize = 6;
const NSCOUNT_OFFSET: usize = 8;
const ARCOUNT_OFFSET: usize = 10;

/// Builds a reply in its own buffer: a copy of the query whose header is
/// patched in place, followed by any appended records. The query slice is
/// never written to.
struct ResponseWriter {
    buf: BytesMut,
}

impl ResponseWriter {
    fn from_query(query: &[u8], extra: usize) -> Option<Self> {
        if query.len() < HEADER_LEN {
            return None;
        }
        let mut buf = BytesMut::with_capacity(query.len() + extra);
        buf.extend_from_slice(query);
        Some(Self { buf })
    }

    fn set_flags(&mut self, flags: [u8; 2]) -> &mut Self {
        self.buf[2..4].copy_from_slice(&flags);
        self
    }

    fn set_count(&mut self, offset: usize, count: u16) -> &mut Self {
        self.buf[offset..offset + 2].copy_from_slice(&count.to_be_bytes());
        self
    }

    fn append_a_record(&mut self, octets: [u8; 4]) -> &mut Self {
        self.buf.put_slice(&QNAME_POINTER);
        self.buf.put_u16(TYPE_A);
        self.buf.put_u16(CLASS_IN);
        self.buf.put_u32(ANSWER_TTL);
        self.buf.put_u16(octets.len() as u16);
        self.buf.put_slice(&octets);
        self
    }

    fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Parses a dotted-decimal IPv4 address into exactly four octets.
pub fn parse_ipv4_octets(address: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = address.trim().split('.');
    for octet in octets.iter_mut() {
        *octet = parts.next()?.parse::<u8>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(octets)
}

/// Answers `query` with a single A record pointing at `address`.
///
/// The transaction ID and question section are carried over byte for byte;
/// ANCOUNT becomes 1 and one record (name pointer to offset 12, type A,
/// class IN, TTL 300, RDLENGTH 4) is appended. Returns `None` when `address`
/// is not four dotted octets or the query is shorter than a header.
pub fn create_address_record(query: &[u8], address: &str) -> Option<Bytes> {
    let octets = parse_ipv4_octets(address)?;
    let mut writer = ResponseWriter::from_query(query, ANSWER_RECORD_LEN)?;
    writer
        .set_flags(FLAGS_ANSWER)
        .set_count(ANCOUNT_OFFSET, 1)
        .append_a_record(octets);
    Some(writer.finish())
}

/// Turns `query` into an NXDOMAIN reply with empty answer, authority and
/// additional sections. Fails only for buffers shorter than a header.
pub fn create_nxdomain(query: &[u8]) -> Option<Bytes> {
    let mut writer = ResponseWriter::from_query(query, 0)?;
    writer
        .set_flags(FLAGS_NXDOMAIN)
        .set_count(ANCOUNT_OFFSET, 0)
        .set_count(NSCOUNT_OFFSET, 0)
        .set_count(ARCOUNT_OFFSET, 0);
    Some(writer.finish())
}
