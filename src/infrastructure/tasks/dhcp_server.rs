//! DHCP Server Task
//!
//! Hands out leases to AP clients. The lease advertises the device as
//! router and DNS server, which is what funnels every lookup into the
//! captive-portal responder.

use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{Ipv4Address, Stack};
use embassy_time::Timer;
use esp_println::println;

use moodlamp_core::dhcp::{build_lease_response, lease_for, parse_lease_request};

use crate::config::BIND_RETRY_DELAY;

const DHCP_SERVER_PORT: u16 = 67;
const DHCP_CLIENT_PORT: u16 = 68;

#[embassy_executor::task]
pub async fn dhcp_server_task(stack: Stack<'static>, ap_ip_address: Ipv4Address) {
    let mut rx_meta = [PacketMetadata::EMPTY; 8];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 8];
    let mut tx_buffer = [0u8; 1024];

    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    while let Err(e) = socket.bind(DHCP_SERVER_PORT) {
        println!(
            "dhcp_server: failed to bind port {}: {:?}",
            DHCP_SERVER_PORT, e
        );
        Timer::after(BIND_RETRY_DELAY).await;
    }

    let ap_ip = ap_ip_address.octets();
    let mut packet = [0u8; 576];
    let mut response = [0u8; 576];

    loop {
        match socket.recv_from(&mut packet).await {
            Ok((len, _remote)) => {
                let Some(request) = parse_lease_request(&packet[..len]) else {
                    continue;
                };
                let Some(reply_kind) = request.kind.reply() else {
                    continue;
                };

                let offered_ip = lease_for(ap_ip, &request.client_mac);
                let response_len = build_lease_response(
                    ap_ip,
                    &mut response,
                    &request,
                    offered_ip,
                    reply_kind,
                );

                let dest = (Ipv4Address::BROADCAST, DHCP_CLIENT_PORT);
                if let Err(_e) = socket.send_to(&response[..response_len], dest).await {
                    #[cfg(feature = "log")]
                    println!("dhcp_server: send error: {:?}", _e);
                }
            }
            Err(_e) => {
                #[cfg(feature = "log")]
                println!("dhcp_server: recv error: {:?}", _e);
            }
        }
    }
}
