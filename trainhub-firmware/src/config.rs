//! Board configuration
//!
//! Pin map of the reference board:
//!
//! | Function        | GPIO | Peripheral         |
//! |-----------------|------|--------------------|
//! | Radio TX / RX   | 0/1  | UART0, 115200 baud |
//! | Power latch     | 14   | output, high holds |
//! | Hub button      | 15   | input, active low  |
//! | Motor bridge    | 16/17| PWM slice 0 A/B    |
//! | Light           | 18   | PWM slice 1 A      |
//! | Status LED      | 25   | output             |
//! | VSYS sense      | 29   | ADC channel 3      |

use defmt::*;
use embassy_time::Instant;

use trainhub_core::config::toml::parse_config;
use trainhub_core::ControlConfig;
use trainhub_hal::Clock;

/// Name reported at boot
pub const HUB_NAME: &str = "trainhub";

/// Radio receiver baud rate
pub const RADIO_BAUD: u32 = 115_200;

/// Embedded configuration (compiled into firmware)
/// Edit hub.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../hub.toml");

/// Parse the embedded configuration, falling back to stock values
pub fn load_config() -> ControlConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: tick={}ms step={} stop={}",
                config.tick_ms, config.step, config.stop_behavior
            );
            config
        }
        Err(e) => {
            warn!("hub.toml rejected ({}), using defaults", e);
            ControlConfig::default()
        }
    }
}

/// Milliseconds since boot from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
