//! In-memory collaborators for unit tests

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use trainhub_hal::storage::check_range;
use trainhub_hal::{
    Button, ButtonSet, ByteStorage, Clock, Color, LightOutput, MotorOutput, PowerControl,
    RemoteAcquirer, RemoteError, RemoteHandle, StorageError,
};

/// Byte storage that starts erased and counts writes
pub struct MemStorage {
    pub bytes: [u8; 8],
    pub writes: usize,
    pub fail_reads: Option<StorageError>,
    pub fail_writes: Option<StorageError>,
}

impl MemStorage {
    pub fn blank() -> Self {
        Self {
            bytes: [0xFF; 8],
            writes: 0,
            fail_reads: None,
            fail_writes: None,
        }
    }

    pub fn with_bytes(speed: u8, brightness: u8) -> Self {
        let mut storage = Self::blank();
        storage.bytes[0] = speed;
        storage.bytes[1] = brightness;
        storage
    }
}

impl ByteStorage for MemStorage {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    async fn read_bytes(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StorageError> {
        if let Some(e) = self.fail_reads {
            return Err(e);
        }
        check_range(self.bytes.len(), offset, buffer.len())?;
        let start = offset as usize;
        buffer.copy_from_slice(&self.bytes[start..start + buffer.len()]);
        Ok(())
    }

    async fn write_bytes(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        if let Some(e) = self.fail_writes {
            return Err(e);
        }
        check_range(self.bytes.len(), offset, data.len())?;
        let start = offset as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

/// What the scripted remote does, shared between the test and the doubles
#[derive(Default)]
pub struct RemoteScript {
    /// Outcomes of successive searches; an empty queue times out
    pub searches: VecDeque<Result<(), RemoteError>>,
    /// Outcomes of successive button queries; an empty queue reports nothing held
    pub queries: VecDeque<Result<ButtonSet, RemoteError>>,
    /// Failure returned when setting the indicator
    pub indicator_error: Option<RemoteError>,
    /// Simulated time each search takes
    pub search_cost: Option<(SimClock, u64)>,
    pub search_calls: usize,
    pub last_search_timeout: Option<u32>,
    pub query_calls: usize,
    pub indicator: Option<Color>,
}

#[derive(Clone, Default)]
pub struct ScriptedRemote(pub Rc<RefCell<RemoteScript>>);

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self) -> std::cell::RefMut<'_, RemoteScript> {
        self.0.borrow_mut()
    }
}

pub struct ScriptedHandle(Rc<RefCell<RemoteScript>>);

impl RemoteAcquirer for ScriptedRemote {
    type Handle = ScriptedHandle;

    async fn acquire(&mut self, timeout_ms: u32) -> Result<ScriptedHandle, RemoteError> {
        let mut script = self.0.borrow_mut();
        script.search_calls += 1;
        script.last_search_timeout = Some(timeout_ms);
        if let Some((clock, ms)) = &script.search_cost {
            clock.advance(*ms);
        }
        match script.searches.pop_front() {
            Some(Ok(())) => Ok(ScriptedHandle(self.0.clone())),
            Some(Err(e)) => Err(e),
            None => Err(RemoteError::Timeout),
        }
    }
}

impl RemoteHandle for ScriptedHandle {
    fn name(&self) -> &str {
        "test remote"
    }

    async fn pressed_buttons(&mut self) -> Result<ButtonSet, RemoteError> {
        let mut script = self.0.borrow_mut();
        script.query_calls += 1;
        script.queries.pop_front().unwrap_or(Ok(ButtonSet::EMPTY))
    }

    async fn set_indicator(&mut self, color: Color) -> Result<(), RemoteError> {
        let mut script = self.0.borrow_mut();
        if let Some(e) = script.indicator_error {
            return Err(e);
        }
        script.indicator = Some(color);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMotor {
    pub outputs: Vec<i8>,
}

impl RecordingMotor {
    pub fn last(&self) -> Option<i8> {
        self.outputs.last().copied()
    }
}

impl MotorOutput for RecordingMotor {
    fn set_output(&mut self, value: i8) {
        self.outputs.push(value);
    }
}

#[derive(Default)]
pub struct RecordingLight {
    pub levels: Vec<u8>,
}

impl RecordingLight {
    pub fn last(&self) -> Option<u8> {
        self.levels.last().copied()
    }
}

impl LightOutput for RecordingLight {
    fn set_level(&mut self, level: u8) {
        self.levels.push(level);
    }
}

#[derive(Default)]
pub struct HeldButton {
    pub down: bool,
}

impl Button for HeldButton {
    fn is_pressed(&mut self) -> bool {
        self.down
    }
}

#[derive(Default)]
pub struct RecordingPower {
    pub shutdowns: usize,
    pub session_exits: usize,
}

impl PowerControl for RecordingPower {
    fn shutdown(&mut self) {
        self.shutdowns += 1;
    }

    fn exit_session(&mut self) {
        self.session_exits += 1;
    }
}

/// Clock advanced only by [`SimDelay`] or by hand
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Delay that returns immediately after moving the simulated clock
pub struct SimDelay(pub SimClock);

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.advance(u64::from(ns) / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.advance(u64::from(ms));
    }
}
