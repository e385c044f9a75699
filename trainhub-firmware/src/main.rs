//! trainhub - Battery Hub Firmware
//!
//! Main firmware binary for RP2040-based battery hubs driving one motor
//! and one light from a push button and an optional wireless remote.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig, Uart};
use embassy_rp::watchdog::Watchdog;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use trainhub_core::input::ButtonAction;
use trainhub_core::remote::ConnectionEvent;
use trainhub_core::{ControlLoop, Halt, TickReport};
use trainhub_hal::{Color, PushButton, StatusLight, SystemInfo};
use trainhub_hal_rp2040::radio::SharedPort;
use trainhub_hal_rp2040::{
    LedStatusLight, PinInput, PinOutput, PowerLatch, PwmLight, PwmMotor, Rp2040ByteStorage,
    Rp2040System, UartRadio,
};

use crate::config::{load_config, EmbassyClock, HUB_NAME, RADIO_BAUD};

mod config;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

// Shared by the search primitive and the bound remote
static RADIO_PORT: StaticCell<SharedPort<BufferedUart>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("trainhub firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let watchdog = Watchdog::new(p.WATCHDOG);
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let vsys = Channel::new_pin(p.PIN_29, Pull::None);
    let mut system = Rp2040System::new(HUB_NAME, &watchdog, adc, vsys);
    info!(
        "{} up, reset reason {}, battery {}mV",
        system.name(),
        system.reset_reason(),
        system.battery_voltage_mv()
    );
    if let Some(ma) = system.battery_current_ma() {
        info!("Battery current {}mA", ma);
    }

    let mut status = LedStatusLight::new(PinOutput::new(Output::new(p.PIN_25, Level::Low)));
    status.set_color(Color::Green);

    let config = load_config();

    // Hold power before anything slow happens
    let power = PowerLatch::hold(PinOutput::new(Output::new(p.PIN_14, Level::High)));
    let button = PushButton::active_low(PinInput::new(Input::new(p.PIN_15, Pull::Up)));

    let motor = PwmMotor::new(Pwm::new_output_ab(
        p.PWM_SLICE0,
        p.PIN_16,
        p.PIN_17,
        PwmConfig::default(),
    ));
    let light = PwmLight::new(Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, PwmConfig::default()));

    let storage = Rp2040ByteStorage::new(p.FLASH, p.DMA_CH0);

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = RADIO_BAUD;
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let radio = UartRadio::new(RADIO_PORT.init(Mutex::new(uart)));
    info!("Radio receiver on UART0");

    let mut control = ControlLoop::new(config, storage, radio, motor, light, button, power);

    match control.start().await {
        Ok(settings) => info!(
            "Settings loaded: speed={} brightness={}",
            settings.speed, settings.brightness
        ),
        Err(e) => {
            error!("Failed to load settings: {}", e);
            defmt::panic!("settings storage unavailable");
        }
    }

    let mut was_connected = false;
    let result = control
        .run_with(&EmbassyClock, &mut Delay, |report, remote| {
            if let (Some(name), false) = (remote, was_connected) {
                info!("Remote bound: {}", name);
            }
            was_connected = remote.is_some();
            log_report(report);
        })
        .await;

    status.set_color(Color::Off);
    match result {
        Ok(Halt::PowerOff) => info!("Power off requested, latch released"),
        Ok(Halt::SessionEnded(saved)) => info!(
            "Session ended, outputs stopped ({} settings bytes written)",
            saved.writes()
        ),
        Err(e) => {
            error!("Control loop failed: {}", e);
            defmt::panic!("unrecoverable control error");
        }
    }

    // Still running means external power keeps the board alive
    loop {
        Timer::after_secs(60).await;
        trace!("Idle heartbeat, battery {}mV", system.battery_voltage_mv());
    }
}

fn log_report(report: &TickReport) {
    if report.is_quiet() {
        return;
    }
    if report.action != ButtonAction::NoEvent {
        info!("Button: {}", report.action);
    }
    match report.link {
        ConnectionEvent::Lost => warn!("Remote lost"),
        ConnectionEvent::Connected(pressed) if !pressed.is_empty() => {
            debug!("Remote buttons {=u8:#x}", pressed.bits())
        }
        _ => {}
    }
    if let Some(on) = report.motor_toggled {
        info!("Motor {}", if on { "on" } else { "off" });
    }
    if let Some(saved) = report.saved {
        if saved.writes() > 0 {
            info!("Settings saved ({} bytes written)", saved.writes());
        } else {
            debug!("Settings unchanged, nothing written");
        }
    }
    if let Some(speed) = report.speed {
        debug!("Speed {}", speed);
    }
    if let Some(brightness) = report.brightness {
        debug!("Brightness {}", brightness);
    }
}
