//! Status page rendering.

use core::fmt::Write as _;

use heapless::String;
use moodlamp_core::ActuatorState;

pub(crate) const PAGE_BUFFER_SIZE: usize = 2048;

/// Render the control page with the current servo angle and light state.
pub(crate) fn render_status_page(
    state: &ActuatorState,
    out: &mut String<PAGE_BUFFER_SIZE>,
) -> Result<(), core::fmt::Error> {
    let light_state = if state.light_on { "ON" } else { "OFF" };
    write!(
        out,
        "<!DOCTYPE html>\
<html>\
<head>\
<title>ESP32 Mood Lamp</title>\
<style>\
body {{ text-align:center; font-family:Arial; background:#222; color:#fff; }}\
h2 {{ color:#FFA500; }}\
button {{ padding:20px 40px; margin:15px; font-size:18px; border:none; border-radius:10px; cursor:pointer; }}\
#toggle {{ background:#4CAF50; color:white; }}\
#off {{ background:#f44336; color:white; }}\
#servo {{ background:#2196F3; color:white; }}\
</style>\
</head>\
<body>\
<h2>ESP32 Mood Lamp &amp; Servo Control</h2>\
<p>Servo angle: <b>{}&deg;</b><br>Light: <b>{}</b></p>\
<a href=\"/toggle\"><button id=\"toggle\">Toggle Light</button></a>\
<a href=\"/off\"><button id=\"off\">Turn Light OFF</button></a>\
<a href=\"/servo\"><button id=\"servo\">Toggle Servo</button></a>\
</body>\
</html>",
        state.servo_angle, light_state
    )
}
