//! HTTP Server Task
//!
//! Runs the control server over the coordinator. The buffers live on the
//! task stack; size the task accordingly.

use embassy_net::Stack;

use crate::{
    config::HTTP_PORT,
    controllers::LampHttpController,
    net::http::HttpServer,
};

const RX_BUFFER_SIZE: usize = 2048;
const TX_BUFFER_SIZE: usize = 4096;

#[embassy_executor::task]
pub async fn http_server_task(
    stack: Stack<'static>,
    controller: &'static LampHttpController,
) {
    let server = HttpServer::new(controller);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    server
        .listen_and_serve(stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await
}
