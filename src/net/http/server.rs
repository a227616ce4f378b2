use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::{Duration, Timer};
#[cfg(feature = "log")]
use esp_println::println;

use super::connection::HttpConnection;
use crate::config::BIND_RETRY_DELAY;

pub trait HttpHandler {
    async fn handle_request(
        &self,
        conn: HttpConnection<'_>,
    ) -> super::HttpResult;
}

pub struct HttpServer<'a, T: HttpHandler> {
    handler: &'a T,
}

impl<'a, T: HttpHandler> HttpServer<'a, T> {
    pub fn new(handler: &'a T) -> Self {
        Self { handler }
    }

    /// Accept and serve connections forever.
    ///
    /// A failed accept (port busy, stack not ready) retries after a fixed
    /// delay; a failed connection is dropped and the loop continues. No
    /// single connection can take the server down.
    pub async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &mut [u8],
        tx_buffer: &mut [u8],
    ) -> ! {
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(Duration::from_secs(30)));

            if socket.accept(port).await.is_err() {
                drop(socket);
                Timer::after(BIND_RETRY_DELAY).await;
                continue;
            }

            let conn = match HttpConnection::from_socket(socket).await {
                Ok(connection) => connection,
                Err(_e) => {
                    #[cfg(feature = "log")]
                    println!("http_server: connection startup error: {:?}", _e);
                    continue;
                }
            };

            if let Err(_e) = self.handler.handle_request(conn).await {
                #[cfg(feature = "log")]
                println!("http_server: connection error: {:?}", _e);
            }
        }
    }
}
