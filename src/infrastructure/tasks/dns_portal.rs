//! Captive-portal DNS Task
//!
//! Answers every DNS query on port 53 with the device's own address. Any
//! packet that cannot be parsed or sent is dropped and the loop continues.

use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::{Ipv4Address, Stack};
use embassy_time::Timer;
use esp_println::println;

use moodlamp_core::dns::build_portal_response;

use crate::config::{BIND_RETRY_DELAY, DNS_PORT};

/// Maximum UDP payload we accept for a query.
const QUERY_BUFFER_SIZE: usize = 512;
/// Query plus the 16-byte synthesized answer.
const REPLY_BUFFER_SIZE: usize = QUERY_BUFFER_SIZE + 16;

#[embassy_executor::task]
pub async fn dns_portal_task(stack: Stack<'static>, device_ip: Ipv4Address) {
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

    while let Err(e) = socket.bind(DNS_PORT) {
        println!("dns_portal: failed to bind port {}: {:?}", DNS_PORT, e);
        Timer::after(BIND_RETRY_DELAY).await;
    }
    println!("dns_portal: answering all queries with {}", device_ip);

    let mut query = [0u8; QUERY_BUFFER_SIZE];
    let mut reply = [0u8; REPLY_BUFFER_SIZE];

    loop {
        match socket.recv_from(&mut query).await {
            Ok((len, remote)) => {
                let Some(reply_len) =
                    build_portal_response(&query[..len], device_ip.octets(), &mut reply)
                else {
                    continue;
                };
                if let Err(_e) = socket.send_to(&reply[..reply_len], remote).await {
                    #[cfg(feature = "log")]
                    println!("dns_portal: send error: {:?}", _e);
                }
            }
            Err(_e) => {
                #[cfg(feature = "log")]
                println!("dns_portal: recv error: {:?}", _e);
            }
        }
    }
}
