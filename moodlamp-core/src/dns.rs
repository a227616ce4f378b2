//! Captive-portal DNS responder codec.
//!
//! Not a DNS server: every query, whatever its name or record type, is
//! answered with a single A record pointing at the device's own address.
//! Clients that try to reach any site are thereby steered onto the control
//! page. The reply echoes the query's transaction ID and question section
//! and uses a compressed-name pointer back to the question for the answer.

/// Fixed DNS header length.
const HEADER_LEN: usize = 12;

/// Bytes appended after the echoed question: name pointer (2), type (2),
/// class (2), TTL (4), rdlength (2), address (4).
const ANSWER_LEN: usize = 16;

/// Response + authoritative-answer + recursion flags, as a captive portal
/// answers everything itself.
const RESPONSE_FLAGS: [u8; 2] = [0x81, 0x80];

/// Compressed-name pointer to offset 12, the start of the question.
const QUESTION_POINTER: [u8; 2] = [0xC0, 0x0C];

/// Answer TTL in seconds. Short, so clients re-ask once off the portal.
const ANSWER_TTL: u32 = 60;

/// Synthesize the canned reply for one query datagram.
///
/// Returns the reply length, or `None` when the datagram is too short to be
/// a DNS query or `reply` cannot hold the answer. Callers drop the packet
/// silently in either case.
pub fn build_portal_response(
    query: &[u8],
    device_ip: [u8; 4],
    reply: &mut [u8],
) -> Option<usize> {
    if query.len() < HEADER_LEN {
        return None;
    }
    let total = query.len() + ANSWER_LEN;
    if reply.len() < total {
        return None;
    }

    // Header: echoed transaction ID, response flags, the query's question
    // count copied into both QDCOUNT and ANCOUNT, zero authority/additional.
    reply[0..2].copy_from_slice(&query[0..2]);
    reply[2..4].copy_from_slice(&RESPONSE_FLAGS);
    reply[4..6].copy_from_slice(&query[4..6]);
    reply[6..8].copy_from_slice(&query[4..6]);
    reply[8..12].fill(0);

    // Question section echoed verbatim.
    reply[12..query.len()].copy_from_slice(&query[12..]);

    // Single A-record answer.
    let mut at = query.len();
    reply[at..at + 2].copy_from_slice(&QUESTION_POINTER);
    at += 2;
    reply[at..at + 2].copy_from_slice(&1u16.to_be_bytes()); // type A
    at += 2;
    reply[at..at + 2].copy_from_slice(&1u16.to_be_bytes()); // class IN
    at += 2;
    reply[at..at + 4].copy_from_slice(&ANSWER_TTL.to_be_bytes());
    at += 4;
    reply[at..at + 2].copy_from_slice(&4u16.to_be_bytes()); // rdlength
    at += 2;
    reply[at..at + 4].copy_from_slice(&device_ip);
    at += 4;

    debug_assert_eq!(at, total);
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE_IP: [u8; 4] = [192, 168, 4, 1];

    /// A query for example.com, type A, class IN.
    fn sample_query() -> std::vec::Vec<u8> {
        let mut q = std::vec::Vec::new();
        q.extend_from_slice(&[0xAB, 0xCD]); // txid
        q.extend_from_slice(&[0x01, 0x00]); // standard query, RD
        q.extend_from_slice(&[0x00, 0x01]); // QDCOUNT
        q.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        q.extend_from_slice(b"\x07example\x03com\x00");
        q.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        q
    }

    #[test]
    fn reply_echoes_transaction_id() {
        let query = sample_query();
        let mut reply = [0u8; 512];
        let len = build_portal_response(&query, DEVICE_IP, &mut reply).unwrap();
        assert_eq!(&reply[0..2], &query[0..2]);
        assert_eq!(len, query.len() + 16);
    }

    #[test]
    fn reply_carries_device_address_regardless_of_name() {
        for name in [&b"\x03foo\x00"[..], &b"\x08whatever\x02io\x00"[..]] {
            let mut query = sample_query()[..12].to_vec();
            query.extend_from_slice(name);
            query.extend_from_slice(&[0x00, 0x1C, 0x00, 0x01]); // AAAA, still answered with A
            let mut reply = [0u8; 512];
            let len = build_portal_response(&query, DEVICE_IP, &mut reply).unwrap();
            assert_eq!(&reply[len - 4..len], &DEVICE_IP);
        }
    }

    #[test]
    fn reply_header_flags_and_counts() {
        let query = sample_query();
        let mut reply = [0u8; 512];
        build_portal_response(&query, DEVICE_IP, &mut reply).unwrap();
        assert_eq!(&reply[2..4], &[0x81, 0x80]);
        assert_eq!(&reply[4..6], &[0x00, 0x01]); // QDCOUNT
        assert_eq!(&reply[6..8], &[0x00, 0x01]); // ANCOUNT mirrors QDCOUNT
        assert_eq!(&reply[8..12], &[0, 0, 0, 0]);
    }

    #[test]
    fn answer_record_layout() {
        let query = sample_query();
        let mut reply = [0u8; 512];
        let len = build_portal_response(&query, DEVICE_IP, &mut reply).unwrap();
        let answer = &reply[query.len()..len];
        assert_eq!(&answer[0..2], &[0xC0, 0x0C]);
        assert_eq!(&answer[2..4], &[0x00, 0x01]); // type A
        assert_eq!(&answer[4..6], &[0x00, 0x01]); // class IN
        assert_eq!(&answer[6..10], &60u32.to_be_bytes());
        assert_eq!(&answer[10..12], &[0x00, 0x04]);
    }

    #[test]
    fn question_section_is_echoed() {
        let query = sample_query();
        let mut reply = [0u8; 512];
        build_portal_response(&query, DEVICE_IP, &mut reply).unwrap();
        assert_eq!(&reply[12..query.len()], &query[12..]);
    }

    #[test]
    fn runt_packet_is_dropped() {
        let mut reply = [0u8; 512];
        assert!(build_portal_response(&[0u8; 11], DEVICE_IP, &mut reply).is_none());
        assert!(build_portal_response(&[], DEVICE_IP, &mut reply).is_none());
    }

    #[test]
    fn oversized_query_is_dropped_when_reply_buffer_is_small() {
        let query = [0u8; 500];
        let mut reply = [0u8; 512];
        assert!(build_portal_response(&query, DEVICE_IP, &mut reply).is_none());
    }
}
