//! Control loop coordinating button, remote, settings and actuators
//!
//! Each tick:
//! 1. Sample the hub button and act on a classified press
//! 2. Poll the remote and translate held buttons into proposed settings
//! 3. Apply each changed field to the settings and the actuators

use embedded_hal_async::delay::DelayNs;
use trainhub_hal::{
    Button, ByteStorage, Clock, LightOutput, MotorOutput, PowerControl, RemoteAcquirer,
};

use crate::config::{ControlConfig, StopBehavior};
use crate::error::Error;
use crate::input::{ButtonAction, InputTranslator, PressClassifier};
use crate::remote::{ConnectionEvent, RemoteLink};
use crate::settings::{SaveOutcome, Settings, SettingsStore};

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Halt {
    /// Long press; the device was told to shut down
    PowerOff,
    /// Stop request with [`StopBehavior::ExitSession`]; settings were saved first
    SessionEnded(SaveOutcome),
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub action: ButtonAction,
    pub link: ConnectionEvent,
    /// New motor power state if it was toggled
    pub motor_toggled: Option<bool>,
    /// Persistence result when the motor was switched off
    pub saved: Option<SaveOutcome>,
    /// New speed if it changed
    pub speed: Option<i8>,
    /// New brightness if it changed
    pub brightness: Option<u8>,
}

impl TickReport {
    /// Whether anything worth reporting happened
    pub fn is_quiet(&self) -> bool {
        self.action == ButtonAction::NoEvent
            && !matches!(self.link, ConnectionEvent::Connected(set) if !set.is_empty())
            && !matches!(self.link, ConnectionEvent::Lost)
            && self.motor_toggled.is_none()
            && self.speed.is_none()
            && self.brightness.is_none()
    }
}

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Continue(TickReport),
    Halt(Halt),
}

/// The hub's control loop
pub struct ControlLoop<S, A, M, L, B, P>
where
    A: RemoteAcquirer,
{
    config: ControlConfig,
    store: SettingsStore<S>,
    link: RemoteLink<A>,
    press: PressClassifier,
    translator: InputTranslator,
    motor: M,
    light: L,
    button: B,
    power: P,
    settings: Settings,
    motor_enabled: bool,
}

impl<S, A, M, L, B, P> ControlLoop<S, A, M, L, B, P>
where
    S: ByteStorage,
    A: RemoteAcquirer,
    M: MotorOutput,
    L: LightOutput,
    B: Button,
    P: PowerControl,
{
    /// Assemble the loop; call [`ControlLoop::start`] before ticking
    pub fn new(
        config: ControlConfig,
        storage: S,
        acquirer: A,
        motor: M,
        light: L,
        button: B,
        power: P,
    ) -> Self {
        Self {
            store: SettingsStore::new(storage),
            link: RemoteLink::new(acquirer, config.remote, config.indicator),
            press: PressClassifier::new(config.press),
            translator: InputTranslator::new(config.step),
            config,
            motor,
            light,
            button,
            power,
            settings: Settings::default(),
            motor_enabled: false,
        }
    }

    /// Load the stored settings and drive both actuators to them
    pub async fn start(&mut self) -> Result<Settings, Error> {
        self.settings = self.store.load().await?;
        self.motor_enabled = true;
        self.motor.set_output(self.settings.speed);
        self.light.set_level(self.settings.brightness);
        Ok(self.settings)
    }

    /// Run one control cycle at time `now_ms`
    pub async fn tick(&mut self, now_ms: u64) -> Result<Step, Error> {
        let action = self.press.update(self.button.is_pressed(), now_ms);
        let mut report = TickReport {
            action,
            ..TickReport::default()
        };

        match action {
            ButtonAction::NoEvent => {}
            ButtonAction::ShortPress => self.toggle_motor(&mut report).await?,
            ButtonAction::StopRequest => match self.config.stop_behavior {
                StopBehavior::PauseMotor => self.toggle_motor(&mut report).await?,
                StopBehavior::ExitSession => {
                    let saved = self.store.save(self.settings).await?;
                    self.motor.set_output(0);
                    self.light.set_level(0);
                    self.power.exit_session();
                    return Ok(Step::Halt(Halt::SessionEnded(saved)));
                }
            },
            ButtonAction::PowerOff => {
                self.power.shutdown();
                return Ok(Step::Halt(Halt::PowerOff));
            }
        }

        report.link = self.link.poll(now_ms).await?;
        if let ConnectionEvent::Connected(pressed) = report.link {
            let candidate = self.translator.translate(pressed, self.settings);
            self.apply(candidate, &mut report);
        }

        Ok(Step::Continue(report))
    }

    /// Tick every `tick_ms` until the loop halts or fails
    pub async fn run<C: Clock, D: DelayNs>(
        &mut self,
        clock: &C,
        delay: &mut D,
    ) -> Result<Halt, Error> {
        self.run_with(clock, delay, |_, _| {}).await
    }

    /// Like [`ControlLoop::run`], handing each report and the bound remote's
    /// name to `observe`
    ///
    /// The full period is slept after every tick, so a slow remote search
    /// delays the next tick instead of causing a burst of catch-up ticks.
    pub async fn run_with<C, D, F>(
        &mut self,
        clock: &C,
        delay: &mut D,
        mut observe: F,
    ) -> Result<Halt, Error>
    where
        C: Clock,
        D: DelayNs,
        F: FnMut(&TickReport, Option<&str>),
    {
        loop {
            delay.delay_ms(self.config.tick_ms).await;
            match self.tick(clock.now_ms()).await? {
                Step::Continue(report) => observe(&report, self.link.remote_name()),
                Step::Halt(halt) => return Ok(halt),
            }
        }
    }

    async fn toggle_motor(&mut self, report: &mut TickReport) -> Result<(), Error> {
        if self.motor_enabled {
            report.saved = Some(self.store.save(self.settings).await?);
            self.motor_enabled = false;
            self.motor.set_output(0);
        } else {
            self.motor_enabled = true;
            self.motor.set_output(self.settings.speed);
        }
        report.motor_toggled = Some(self.motor_enabled);
        Ok(())
    }

    fn apply(&mut self, candidate: Settings, report: &mut TickReport) {
        if candidate.speed != self.settings.speed {
            self.settings.speed = candidate.speed;
            if self.motor_enabled {
                self.motor.set_output(candidate.speed);
            }
            report.speed = Some(candidate.speed);
        }
        if candidate.brightness != self.settings.brightness {
            self.settings.brightness = candidate.brightness;
            self.light.set_level(candidate.brightness);
            report.brightness = Some(candidate.brightness);
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn motor_enabled(&self) -> bool {
        self.motor_enabled
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn remote_connected(&self) -> bool {
        self.link.is_connected()
    }

    /// Name of the bound remote, if any
    pub fn remote_name(&self) -> Option<&str> {
        self.link.remote_name()
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn light(&self) -> &L {
        &self.light
    }

    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    pub fn power(&self) -> &P {
        &self.power
    }
}
