//! Moodlamp Firmware
//!
//! Brings the device up as a captive portal:
//! - Starts a WPA2 Wi-Fi Access Point
//! - Runs a DHCP server that points clients' DNS at the device
//! - Answers every DNS query with the device's own address
//! - Serves the HTTP control page on 192.168.4.1
//! - Polls the touch sensor for short-tap / long-hold gestures
//!
//! All actuator access goes through the coordinator; see `coordinator.rs`.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig, Pull},
    timer::timg::TimerGroup,
};
use esp_println::println;

use esp_moodlamp::{
    config,
    controllers::LampHttpController,
    coordinator::Coordinator,
    infrastructure::{
        drivers::{ApConfig, LedStrip, ServoPwm, start_wifi_ap},
        tasks::{dhcp_server_task, dns_portal_task, http_server_task, touch_input_task},
    },
    mk_static,
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  ESP32 Mood Lamp");
    println!("=================================");

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start RTOS
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Actuators: servo signal on GPIO0, strip data on GPIO21.
    let servo = ServoPwm::new(peripherals.LEDC, peripherals.GPIO0);
    let strip = LedStrip::new(peripherals.RMT, peripherals.GPIO21);
    let coordinator =
        Coordinator::init(servo, strip).expect("Failed to initialize actuators");

    // Touch sensor on GPIO1, active high.
    let touch = Input::new(
        peripherals.GPIO1,
        InputConfig::default().with_pull(Pull::Down),
    );
    spawner.spawn(touch_input_task(touch, coordinator)).ok();

    // Bring up the access point, then the captive-portal servers.
    let stack = start_wifi_ap(
        spawner,
        peripherals.WIFI,
        ApConfig {
            ssid: config::AP_SSID,
            password: config::AP_PASSWORD,
            address: config::AP_ADDRESS,
            prefix_len: config::AP_PREFIX_LEN,
        },
    )
    .await;
    println!("AP link is up!");

    spawner.spawn(dhcp_server_task(stack, config::AP_ADDRESS)).ok();
    spawner.spawn(dns_portal_task(stack, config::AP_ADDRESS)).ok();

    let controller = mk_static!(
        LampHttpController,
        LampHttpController::new(coordinator)
    );
    spawner.spawn(http_server_task(stack, controller)).ok();

    println!("Connect to WiFi: {}", config::AP_SSID);
    println!("Open http://{} in browser", config::AP_ADDRESS);

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
