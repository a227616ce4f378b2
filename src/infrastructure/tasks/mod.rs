mod dhcp_server;
mod dns_portal;
mod http_server;
mod touch_input;

pub use dhcp_server::dhcp_server_task;
pub use dns_portal::dns_portal_task;
pub use http_server::http_server_task;
pub use touch_input::touch_input_task;
