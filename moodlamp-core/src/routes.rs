//! HTTP control-surface routes.
//!
//! Maps a request path (with optional query string) onto one device intent.
//! The surface is deliberately tiny and GET-only; anything unrecognized, and
//! any route with missing or non-numeric parameters, degrades to `Status`,
//! which renders the status page without touching state.

/// One parsed control intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Sweep the servo to the opposite endpoint.
    ToggleServo,
    /// Toggle the light, restoring the remembered color when turning on.
    ToggleLight,
    /// Turn the light off, preserving the base color.
    LightOff,
    /// Set the base color and turn the light on.
    SetColor { r: u8, g: u8, b: u8 },
    /// Set the brightness percentage.
    SetBrightness { pct: u8 },
    /// No state change; serve the status page.
    Status,
}

impl ControlRequest {
    /// Whether this request answers with the status page (as opposed to an
    /// empty 204).
    pub fn renders_page(&self) -> bool {
        !matches!(
            self,
            ControlRequest::SetColor { .. } | ControlRequest::SetBrightness { .. }
        )
    }
}

/// Parse a request path like `/color?r=255&g=100&b=0` into an intent.
pub fn parse_request(path: &str) -> ControlRequest {
    let (route, query) = match path.split_once('?') {
        Some((route, query)) => (route, query),
        None => (path, ""),
    };

    match route {
        "/servo" => ControlRequest::ToggleServo,
        "/led" | "/toggle" => ControlRequest::ToggleLight,
        "/off" => ControlRequest::LightOff,
        "/color" => parse_color(query).unwrap_or(ControlRequest::Status),
        "/brightness" => parse_brightness(query).unwrap_or(ControlRequest::Status),
        _ => ControlRequest::Status,
    }
}

fn parse_color(query: &str) -> Option<ControlRequest> {
    let r = param_u8(query, "r")?;
    let g = param_u8(query, "g")?;
    let b = param_u8(query, "b")?;
    Some(ControlRequest::SetColor { r, g, b })
}

fn parse_brightness(query: &str) -> Option<ControlRequest> {
    let pct = param_u8(query, "value")?;
    Some(ControlRequest::SetBrightness { pct })
}

/// Look up a query parameter by key. No percent-decoding; the control page
/// only ever sends plain decimal values.
fn param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then_some(v)
    })
}

fn param_u8(query: &str, key: &str) -> Option<u8> {
    param(query, key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_routes() {
        assert_eq!(parse_request("/servo"), ControlRequest::ToggleServo);
        assert_eq!(parse_request("/led"), ControlRequest::ToggleLight);
        assert_eq!(parse_request("/toggle"), ControlRequest::ToggleLight);
        assert_eq!(parse_request("/off"), ControlRequest::LightOff);
        assert_eq!(parse_request("/"), ControlRequest::Status);
        assert_eq!(parse_request("/favicon.ico"), ControlRequest::Status);
    }

    #[test]
    fn color_with_all_params() {
        assert_eq!(
            parse_request("/color?r=255&g=100&b=0"),
            ControlRequest::SetColor { r: 255, g: 100, b: 0 }
        );
    }

    #[test]
    fn color_param_order_does_not_matter() {
        assert_eq!(
            parse_request("/color?b=3&r=1&g=2"),
            ControlRequest::SetColor { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn color_with_missing_param_is_skipped() {
        assert_eq!(parse_request("/color?r=255&g=100"), ControlRequest::Status);
        assert_eq!(parse_request("/color"), ControlRequest::Status);
    }

    #[test]
    fn color_with_non_numeric_param_is_skipped() {
        assert_eq!(
            parse_request("/color?r=red&g=0&b=0"),
            ControlRequest::Status
        );
        assert_eq!(parse_request("/color?r=300&g=0&b=0"), ControlRequest::Status);
    }

    #[test]
    fn brightness_value() {
        assert_eq!(
            parse_request("/brightness?value=50"),
            ControlRequest::SetBrightness { pct: 50 }
        );
        assert_eq!(parse_request("/brightness?value="), ControlRequest::Status);
        assert_eq!(parse_request("/brightness"), ControlRequest::Status);
    }

    #[test]
    fn page_vs_no_content_split() {
        assert!(parse_request("/servo").renders_page());
        assert!(parse_request("/").renders_page());
        assert!(!parse_request("/color?r=1&g=2&b=3").renders_page());
        assert!(!parse_request("/brightness?value=9").renders_page());
        // A malformed color request falls back to the page.
        assert!(parse_request("/color?r=1").renders_page());
    }
}
