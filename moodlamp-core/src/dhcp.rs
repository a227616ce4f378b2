//! Stateless DHCP codec for the access point.
//!
//! Clients joining the AP need an address before the DNS trick can capture
//! them, and the lease must advertise the device itself as the DNS server.
//! The allocation is stateless: each client's lease is derived from its MAC,
//! so repeated DISCOVER/REQUEST exchanges stay consistent without a lease
//! table.

/// BOOTP header plus magic cookie.
const MIN_PACKET_LEN: usize = 240;

const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

const OPT_SUBNET_MASK: u8 = 1;
const OPT_ROUTER: u8 = 3;
const OPT_DNS: u8 = 6;
const OPT_LEASE_TIME: u8 = 51;
const OPT_MESSAGE_TYPE: u8 = 53;
const OPT_SERVER_ID: u8 = 54;
const OPT_END: u8 = 255;

const LEASE_TIME_SECS: u32 = 3600;
const SUBNET_MASK: [u8; 4] = [255, 255, 255, 0];

/// Inbound message kinds we answer, and the kinds we answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Discover,
    Offer,
    Request,
    Ack,
}

impl MessageKind {
    fn from_option(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Discover),
            2 => Some(Self::Offer),
            3 => Some(Self::Request),
            5 => Some(Self::Ack),
            _ => None,
        }
    }

    const fn as_option(self) -> u8 {
        match self {
            Self::Discover => 1,
            Self::Offer => 2,
            Self::Request => 3,
            Self::Ack => 5,
        }
    }

    /// The reply this request kind gets, if any.
    pub fn reply(self) -> Option<Self> {
        match self {
            Self::Discover => Some(Self::Offer),
            Self::Request => Some(Self::Ack),
            Self::Offer | Self::Ack => None,
        }
    }
}

/// The parts of a client request the responder needs.
#[derive(Debug)]
pub struct LeaseRequest {
    pub xid: [u8; 4],
    pub client_mac: [u8; 6],
    pub kind: MessageKind,
}

/// Parse a BOOTREQUEST. Returns `None` for runts, non-requests, a missing
/// magic cookie or an unknown message type.
pub fn parse_lease_request(packet: &[u8]) -> Option<LeaseRequest> {
    if packet.len() < MIN_PACKET_LEN {
        return None;
    }
    if packet[0] != 1 {
        // Not a BOOTREQUEST.
        return None;
    }
    if packet[236..240] != MAGIC_COOKIE {
        return None;
    }

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);
    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    let kind = find_option(&packet[240..], OPT_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())
        .and_then(MessageKind::from_option)?;

    Some(LeaseRequest {
        xid,
        client_mac,
        kind,
    })
}

/// Derive a stable lease address in `.2 ..= .50` on the AP's /24 from the
/// client MAC.
pub fn lease_for(ap_ip: [u8; 4], mac: &[u8; 6]) -> [u8; 4] {
    [ap_ip[0], ap_ip[1], ap_ip[2], (mac[5] % 49) + 2]
}

/// Build an OFFER or ACK into `buffer`, returning its length.
///
/// The lease points router *and DNS* at the AP address; routing DNS to the
/// device is what arms the captive portal.
pub fn build_lease_response(
    ap_ip: [u8; 4],
    buffer: &mut [u8; 576],
    request: &LeaseRequest,
    offered_ip: [u8; 4],
    kind: MessageKind,
) -> usize {
    buffer.fill(0);

    buffer[0] = 2; // BOOTREPLY
    buffer[1] = 1; // htype: Ethernet
    buffer[2] = 6; // hlen
    buffer[4..8].copy_from_slice(&request.xid);
    buffer[10..12].copy_from_slice(&[0x80, 0x00]); // broadcast flag
    buffer[16..20].copy_from_slice(&offered_ip); // yiaddr
    buffer[20..24].copy_from_slice(&ap_ip); // siaddr
    buffer[28..34].copy_from_slice(&request.client_mac);
    buffer[236..240].copy_from_slice(&MAGIC_COOKIE);

    let mut at = 240;
    at = push_option(buffer, at, OPT_MESSAGE_TYPE, &[kind.as_option()]);
    at = push_option(buffer, at, OPT_SERVER_ID, &ap_ip);
    at = push_option(buffer, at, OPT_LEASE_TIME, &LEASE_TIME_SECS.to_be_bytes());
    at = push_option(buffer, at, OPT_SUBNET_MASK, &SUBNET_MASK);
    at = push_option(buffer, at, OPT_ROUTER, &ap_ip);
    at = push_option(buffer, at, OPT_DNS, &ap_ip);
    buffer[at] = OPT_END;
    at + 1
}

fn push_option(buffer: &mut [u8], at: usize, code: u8, data: &[u8]) -> usize {
    buffer[at] = code;
    buffer[at + 1] = data.len() as u8;
    buffer[at + 2..at + 2 + data.len()].copy_from_slice(data);
    at + 2 + data.len()
}

/// Scan the options section (starting after the magic cookie) for one code.
fn find_option(options: &[u8], code: u8) -> Option<&[u8]> {
    let mut i = 0;
    while i < options.len() {
        let current = options[i];
        if current == OPT_END {
            break;
        }
        if current == 0 {
            i += 1; // padding
            continue;
        }
        if i + 1 >= options.len() {
            break;
        }
        let len = options[i + 1] as usize;
        if i + 2 + len > options.len() {
            break;
        }
        if current == code {
            return Some(&options[i + 2..i + 2 + len]);
        }
        i += 2 + len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const AP_IP: [u8; 4] = [192, 168, 4, 1];
    const MAC: [u8; 6] = [0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x2A];

    fn discover_packet() -> std::vec::Vec<u8> {
        let mut p = std::vec::Vec::new();
        p.resize(MIN_PACKET_LEN, 0u8);
        p[0] = 1; // BOOTREQUEST
        p[4..8].copy_from_slice(&[1, 2, 3, 4]);
        p[28..34].copy_from_slice(&MAC);
        p[236..240].copy_from_slice(&MAGIC_COOKIE);
        p.extend_from_slice(&[OPT_MESSAGE_TYPE, 1, 1, OPT_END]);
        p
    }

    #[test]
    fn parses_discover() {
        let request = parse_lease_request(&discover_packet()).unwrap();
        assert_eq!(request.kind, MessageKind::Discover);
        assert_eq!(request.xid, [1, 2, 3, 4]);
        assert_eq!(request.client_mac, MAC);
        assert_eq!(request.kind.reply(), Some(MessageKind::Offer));
    }

    #[test]
    fn rejects_bootreply_and_runts() {
        let mut packet = discover_packet();
        packet[0] = 2;
        assert!(parse_lease_request(&packet).is_none());
        assert!(parse_lease_request(&[0u8; 100]).is_none());
    }

    #[test]
    fn rejects_bad_magic_cookie() {
        let mut packet = discover_packet();
        packet[236] = 0;
        assert!(parse_lease_request(&packet).is_none());
    }

    #[test]
    fn lease_is_stable_and_in_range() {
        let first = lease_for(AP_IP, &MAC);
        assert_eq!(first, lease_for(AP_IP, &MAC));
        assert_eq!(&first[..3], &AP_IP[..3]);
        assert!(first[3] >= 2 && first[3] <= 50);
        // Never collides with the AP itself.
        for last in 0..=255u8 {
            let mut mac = MAC;
            mac[5] = last;
            assert_ne!(lease_for(AP_IP, &mac), AP_IP);
        }
    }

    #[test]
    fn response_advertises_ap_as_dns() {
        let request = parse_lease_request(&discover_packet()).unwrap();
        let offered = lease_for(AP_IP, &request.client_mac);
        let mut buffer = [0u8; 576];
        let len =
            build_lease_response(AP_IP, &mut buffer, &request, offered, MessageKind::Offer);

        assert_eq!(buffer[0], 2);
        assert_eq!(&buffer[4..8], &request.xid);
        assert_eq!(&buffer[16..20], &offered);
        let options = &buffer[240..len];
        assert_eq!(find_option(options, OPT_MESSAGE_TYPE), Some(&[2u8][..]));
        assert_eq!(find_option(options, OPT_DNS), Some(&AP_IP[..]));
        assert_eq!(find_option(options, OPT_ROUTER), Some(&AP_IP[..]));
        assert_eq!(
            find_option(options, OPT_LEASE_TIME),
            Some(&LEASE_TIME_SECS.to_be_bytes()[..])
        );
    }

    #[test]
    fn request_gets_ack() {
        let mut packet = discover_packet();
        let end = packet.len();
        packet[end - 2] = 3; // message type REQUEST
        let request = parse_lease_request(&packet).unwrap();
        assert_eq!(request.kind.reply(), Some(MessageKind::Ack));
    }
}
