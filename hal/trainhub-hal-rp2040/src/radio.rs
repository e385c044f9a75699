//! Wireless remote through a UART radio receiver
//!
//! The receiver module does pairing and the air protocol; the hub sends it
//! one framed request at a time and waits a bounded time for the reply.
//! The serial port is shared between the search primitive and the bound
//! remote's handle, so it lives behind a static mutex.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::{Read, ReadReady, Write};
use heapless::String;

use trainhub_hal::{ButtonSet, Color, RemoteAcquirer, RemoteError, RemoteHandle};
use trainhub_protocol::session::{
    ack_outcome, bind_outcome, query_outcome, FATAL_IO, FATAL_UNEXPECTED_REPLY, REPLY_WINDOW_MS,
};
use trainhub_protocol::{FrameParser, HubMessage, ReceiverMessage, MAX_NAME_LEN};

/// Serial port shared by the radio and its bound remote
pub type SharedPort<P> = Mutex<CriticalSectionRawMutex, P>;

/// Time the receiver may take beyond the search window to report
const BIND_MARGIN_MS: u64 = 100;

/// Send `request` and wait up to `wait_ms` for the reply
///
/// Stale bytes from a reply that arrived after an earlier timeout are
/// discarded before sending. Corrupt frames are skipped while waiting.
async fn exchange<P>(
    port: &SharedPort<P>,
    request: HubMessage,
    wait_ms: u64,
) -> Result<Option<ReceiverMessage>, RemoteError>
where
    P: Read + Write + ReadReady,
{
    let mut port = port.lock().await;
    let io = |_| RemoteError::Fatal(FATAL_IO);

    let mut scratch = [0u8; 16];
    while port.read_ready().map_err(io)? {
        port.read(&mut scratch).await.map_err(io)?;
    }

    let frame = request
        .to_frame()
        .map_err(|_| RemoteError::Fatal(FATAL_UNEXPECTED_REPLY))?;
    port.write_all(&frame.to_bytes()).await.map_err(io)?;
    port.flush().await.map_err(io)?;

    match with_timeout(Duration::from_millis(wait_ms), read_reply(&mut *port)).await {
        Ok(reply) => reply.map(Some),
        Err(_) => Ok(None),
    }
}

async fn read_reply<P: Read>(port: &mut P) -> Result<ReceiverMessage, RemoteError> {
    let mut parser = FrameParser::new();
    let mut byte = [0u8; 1];
    loop {
        let n = port
            .read(&mut byte)
            .await
            .map_err(|_| RemoteError::Fatal(FATAL_IO))?;
        if n == 0 {
            return Err(RemoteError::Fatal(FATAL_IO));
        }
        match parser.push(byte[0]) {
            Ok(Some(frame)) => {
                return ReceiverMessage::from_frame(&frame)
                    .map_err(|_| RemoteError::Fatal(FATAL_UNEXPECTED_REPLY))
            }
            Ok(None) | Err(_) => {}
        }
    }
}

/// Search primitive of the radio receiver
pub struct UartRadio<P: 'static> {
    port: &'static SharedPort<P>,
}

impl<P> UartRadio<P>
where
    P: Read + Write + ReadReady + 'static,
{
    pub fn new(port: &'static SharedPort<P>) -> Self {
        Self { port }
    }
}

impl<P> RemoteAcquirer for UartRadio<P>
where
    P: Read + Write + ReadReady + 'static,
{
    type Handle = RadioRemote<P>;

    async fn acquire(&mut self, timeout_ms: u32) -> Result<RadioRemote<P>, RemoteError> {
        let window = timeout_ms.min(u32::from(u16::MAX)) as u16;
        let reply = exchange(
            self.port,
            HubMessage::Bind { timeout_ms: window },
            u64::from(window) + BIND_MARGIN_MS,
        )
        .await?;
        let name = bind_outcome(reply)?;
        Ok(RadioRemote {
            port: self.port,
            name,
        })
    }
}

/// A remote bound through the radio receiver
///
/// The receiver keeps a single binding; the next `Bind` replaces it.
pub struct RadioRemote<P: 'static> {
    port: &'static SharedPort<P>,
    name: String<MAX_NAME_LEN>,
}

impl<P> RemoteHandle for RadioRemote<P>
where
    P: Read + Write + ReadReady + 'static,
{
    fn name(&self) -> &str {
        self.name.as_str()
    }

    async fn pressed_buttons(&mut self) -> Result<ButtonSet, RemoteError> {
        let reply = exchange(self.port, HubMessage::Query, REPLY_WINDOW_MS).await?;
        query_outcome(reply)
    }

    async fn set_indicator(&mut self, color: Color) -> Result<(), RemoteError> {
        let reply = exchange(self.port, HubMessage::Indicator(color), REPLY_WINDOW_MS).await?;
        ack_outcome(reply)
    }
}
