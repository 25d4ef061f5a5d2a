use super::{HEADER_LEN, MAX_LABEL_LEN};

/// Extracts the queried name from a raw DNS query.
///
/// Walks the length-prefixed labels that follow the 12-byte header and joins
/// them with `.` (no trailing dot). Returns `None` for anything that cannot be
/// read cleanly:
///
/// * Buffer not longer than the header
/// * Label length above 63 (compression pointer or extended label type)
/// * Label running past the end of the buffer
/// * Label bytes that are not valid UTF-8
/// * Name not terminated by a zero-length label
/// * Empty (root) name
///
/// The decoded name is only used for lookups; callers keep echoing or
/// forwarding the original bytes.
pub fn extract_domain(query: &[u8]) -> Option<String> {
    if query.len() <= HEADER_LEN {
        return None;
    }

    let mut pos = HEADER_LEN;
    let mut domain = String::new();

    loop {
        let label_len = *query.get(pos)? as usize;
        pos += 1;
        if label_len == 0 {
            break;
        }
        if label_len > MAX_LABEL_LEN || pos + label_len > query.len() {
            return None;
        }
        let label = core::str::from_utf8(&query[pos..pos + label_len]).ok()?;
        if !domain.is_empty() {
            domain.push('.');
        }
        domain.push_str(label);
        pos += label_len;
    }

    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}
