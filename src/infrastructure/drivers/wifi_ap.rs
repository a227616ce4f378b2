use embassy_executor::Spawner;
use embassy_net::{
    Ipv4Address,
    Ipv4Cidr,
    Runner,
    Stack,
    StackResources,
    StaticConfigV4,
};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
#[cfg(feature = "log")]
use esp_println::println;
use esp_radio::wifi::{
    AccessPointConfig,
    AuthMethod,
    Config,
    ModeConfig,
    WifiController,
    WifiDevice,
};

use super::random::get_seed;
use crate::mk_static;

const MAX_CONNECTIONS: usize = 6;

pub struct ApConfig {
    pub ssid: &'static str,
    pub password: &'static str,
    pub address: Ipv4Address,
    pub prefix_len: u8,
}

/// Initialize the network stack for AP (Access Point) mode.
///
/// Uses a static IP configuration suitable for a captive portal and waits
/// for the link before returning, so callers can bind sockets right away.
pub async fn start_wifi_ap(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    config: ApConfig,
) -> Stack<'static> {
    let esp_radio_ctrl = &*mk_static!(
        esp_radio::Controller<'static>,
        esp_radio::init().expect("Failed to initialize radio")
    );
    let (controller, interfaces) =
        esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())
            .expect("Failed to create wifi interface");

    let static_config = StaticConfigV4 {
        address: Ipv4Cidr::new(config.address, config.prefix_len),
        gateway: Some(config.address),
        dns_servers: heapless::Vec::default(),
    };
    let net_config = embassy_net::Config::ipv4_static(static_config);

    let network_resources = mk_static!(
        StackResources<MAX_CONNECTIONS>,
        StackResources::<MAX_CONNECTIONS>::new()
    );
    let (stack, runner) =
        embassy_net::new(interfaces.ap, net_config, network_resources, get_seed());

    spawner
        .spawn(wifi_ap_task(controller, config.ssid, config.password))
        .ok();
    spawner.spawn(network_runner_task(runner)).ok();

    loop {
        if stack.is_link_up() {
            break;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
    // Give some extra time
    Timer::after(Duration::from_millis(100)).await;

    stack
}

/// Background task for running the Wi-Fi AP
///
/// Configures the controller as a WPA2 access point and keeps it up.
#[embassy_executor::task]
async fn wifi_ap_task(
    mut controller: WifiController<'static>,
    ssid: &'static str,
    password: &'static str,
) {
    #[cfg(feature = "log")]
    println!("wifi_ap: starting AP with SSID '{}'", ssid);

    let ap_config = AccessPointConfig::default()
        .with_ssid(ssid.into())
        .with_auth_method(AuthMethod::Wpa2Personal)
        .with_password(password.into());

    let mode_config = ModeConfig::AccessPoint(ap_config);
    controller
        .set_config(&mode_config)
        .expect("Failed to configure AP");
    controller.start_async().await.expect("Failed to start AP");

    #[cfg(feature = "log")]
    println!("wifi_ap: AP started");

    // Keep the AP running
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
