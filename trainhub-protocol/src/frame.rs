//! Frame encoding and decoding
//!
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-32)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-32 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE and every PAYLOAD byte

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Size of the frame envelope around the payload
const OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = OVERHEAD + MAX_PAYLOAD_SIZE;

/// Errors from frame encoding and parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Length byte or payload contents are malformed
    InvalidFrame,
    /// Type byte is not a known message
    UnknownType(u8),
    /// Output buffer too small for the encoded frame
    BufferTooSmall,
}

/// A message type byte plus its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub msg_type: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ msg_type, |acc, b| acc ^ b)
}

impl Frame {
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Frame without payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Number of bytes [`Frame::encode`] writes
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    /// Encode into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (head, rest) = out.split_at_mut(3);
        head.copy_from_slice(&[FRAME_START, length, self.msg_type]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = checksum(length, self.msg_type, &self.payload);

        Ok(len)
    }

    /// Encode into a fixed-capacity vector
    pub fn to_bytes(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut out = Vec::new();
        // Capacity covers the largest frame, so none of these pushes fail
        let _ = out.extend_from_slice(&[FRAME_START, self.payload.len() as u8, self.msg_type]);
        let _ = out.extend_from_slice(&self.payload);
        let _ = out.push(checksum(
            self.payload.len() as u8,
            self.msg_type,
            &self.payload,
        ));
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Sync,
    Length,
    Type,
    Payload,
    Checksum,
}

/// Incremental frame parser
///
/// Bytes before a START byte are skipped, so the parser resynchronizes on
/// its own after line noise or a dropped frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    stage: Stage,
    length: u8,
    msg_type: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            stage: Stage::Sync,
            length: 0,
            msg_type: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partially received frame
    pub fn reset(&mut self) {
        self.stage = Stage::Sync;
        self.length = 0;
        self.msg_type = 0;
        self.payload.clear();
    }

    /// Whether the parser is between frames
    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Sync
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(frame))` once a complete frame with a valid checksum
    /// has arrived. On error the partial frame is discarded.
    pub fn push(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.stage {
            Stage::Sync => {
                if byte == FRAME_START {
                    self.stage = Stage::Length;
                }
            }
            Stage::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.length = byte;
                self.stage = Stage::Type;
            }
            Stage::Type => {
                self.msg_type = byte;
                self.payload.clear();
                self.stage = if self.length == 0 {
                    Stage::Checksum
                } else {
                    Stage::Payload
                };
            }
            Stage::Payload => {
                // Length was bounded in Stage::Length
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.stage = Stage::Checksum;
                }
            }
            Stage::Checksum => {
                let valid = byte == checksum(self.length, self.msg_type, &self.payload);
                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return if valid {
                    Ok(Some(frame))
                } else {
                    Err(FrameError::InvalidChecksum)
                };
            }
        }
        Ok(None)
    }

    /// Feed bytes until the first complete frame
    ///
    /// Returns the frame and the number of bytes consumed; bytes after the
    /// frame are left for the next call.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Result<(Option<Frame>, usize), FrameError> {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(frame) = self.push(byte)? {
                return Ok((Some(frame), i + 1));
            }
        }
        Ok((None, bytes.len()))
    }
}
