//! HTTP control surface.
//!
//! Every route maps to exactly one coordinator operation and then renders
//! its response from a fresh state snapshot. A hardware fault aborts the
//! operation but never the response: the client still gets the status page
//! (or the empty 204), per the containment policy for per-request failures.

use esp_println::println;
use heapless::String;

use moodlamp_core::routes::{ControlRequest, parse_request};

use crate::{
    config::SWEEP_STEP_DELAY,
    coordinator::Coordinator,
    net::http::{ContentHeaders, HttpConnection, HttpHandler, HttpResult, ResponseHeaders},
};

use super::page::{PAGE_BUFFER_SIZE, render_status_page};

pub struct LampHttpController {
    coordinator: Coordinator,
}

impl LampHttpController {
    pub fn new(coordinator: Coordinator) -> Self {
        Self { coordinator }
    }

    async fn apply(&self, request: ControlRequest) {
        let result = match request {
            ControlRequest::ToggleServo => {
                self.coordinator.toggle_servo_sweep(SWEEP_STEP_DELAY).await;
                Ok(())
            }
            ControlRequest::ToggleLight => self.coordinator.toggle_light().await,
            ControlRequest::LightOff => self.coordinator.turn_off().await,
            ControlRequest::SetColor { r, g, b } => {
                match self.coordinator.set_color(r, g, b).await {
                    Ok(()) => self.coordinator.turn_on().await,
                    Err(fault) => Err(fault),
                }
            }
            ControlRequest::SetBrightness { pct } => {
                self.coordinator.set_brightness(pct).await
            }
            ControlRequest::Status => Ok(()),
        };

        if let Err(fault) = result {
            println!("http: actuator write failed: {:?}", fault);
        }
    }
}

impl HttpHandler for LampHttpController {
    async fn handle_request(&self, mut conn: HttpConnection<'_>) -> HttpResult {
        let request = parse_request(conn.path.as_str());

        self.apply(request).await;

        if !request.renders_page() {
            return conn
                .write_headers(&ResponseHeaders::success_no_content())
                .await;
        }

        let snapshot = self.coordinator.snapshot().await;
        let mut page = String::<PAGE_BUFFER_SIZE>::new();
        render_status_page(&snapshot, &mut page)?;

        let headers =
            ResponseHeaders::success().with_content(ContentHeaders::html(page.len()));
        conn.write_headers(&headers).await?;
        conn.write_body(page.as_bytes()).await
    }
}
