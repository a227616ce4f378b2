use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::String;

use super::{
    Error,
    HttpResult,
    headers::{ResponseHeaders, TargetWriter as _, parse_request_line, read_heading},
};

const HEADER_BUFFER_SIZE: usize = 512;
const STREAM_CHUNK_SIZE: usize = 1024;

/// HTTP connection context.
///
/// The control surface is GET-only, so only the request line is retained;
/// request headers and any body are read off the socket and discarded.
pub struct HttpConnection<'a> {
    pub method: super::HttpMethod,
    pub path: String<128>,

    socket: TcpSocket<'a>,
}

impl<'a> HttpConnection<'a> {
    /// Create a new HTTP connection from a socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut header_buf = [0u8; HEADER_BUFFER_SIZE];
        let (header_end, _len) = read_heading(&mut header_buf, &mut socket).await?;

        let header_str = core::str::from_utf8(&header_buf[..header_end])
            .map_err(|_| Error::Parse)?;
        let (method, raw_path) = parse_request_line(header_str).ok_or(Error::Parse)?;

        let mut path = String::new();
        // Overlong targets stay empty; the router treats them as unknown.
        let _ = path.push_str(raw_path);

        Ok(Self {
            method,
            path,
            socket,
        })
    }

    /// Write the response headers to the connection.
    pub async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        let mut buf = String::<HEADER_BUFFER_SIZE>::new();
        headers.write_to(&mut buf)?;
        self.socket.write_all(buf.as_bytes()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Write the response body to the connection.
    pub async fn write_body(&mut self, body: &[u8]) -> HttpResult {
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await?;
            self.socket.flush().await?;
        }
        Ok(())
    }
}
