//! Scale reader — latest weight from a serial-attached scale.
//!
//! DESIGN
//! ======
//! The scale streams short frames wrapped in STX (0x02) / ETX (0x03). A
//! background task reads fixed-size chunks from the device, strips the
//! framing bytes, and keeps only the most recent reading. Submissions read
//! that value when they record a transaction; readings are never queued.
//!
//! The reader is generic over `AsyncRead` so it runs against the device
//! file in production and against in-memory buffers in tests. Line settings
//! (baud rate, parity, stop bits) are configured on the device outside the
//! process, e.g. `stty -F /dev/ttyUSB0 9600 cs8 -parenb -cstopb raw`.
//!
//! ERROR HANDLING
//! ==============
//! Undecodable chunks are logged and skipped. An I/O error or end of stream
//! stops the reader; the last good reading stays available.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Start-of-text framing byte.
pub const STX: u8 = 0x02;
/// End-of-text framing byte.
pub const ETX: u8 = 0x03;

/// Raw scale readings are integer hundredths of the weight unit.
const READING_SCALE: f64 = 100.0;

#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    #[error("scale read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("scale reading is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Shared slot holding the most recent cleaned reading.
#[derive(Debug, Clone, Default)]
pub struct LatestReading(Arc<RwLock<Option<String>>>);

impl LatestReading {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<String> {
        self.0.read().await.clone()
    }

    pub async fn set(&self, reading: String) {
        *self.0.write().await = Some(reading);
    }
}

/// Strip framing bytes from a raw chunk and decode it.
///
/// Returns `Ok(None)` when nothing but framing or whitespace remains.
///
/// # Errors
///
/// Returns `ScaleError::Decode` if the payload is not valid UTF-8.
pub fn clean_reading(raw: &[u8]) -> Result<Option<String>, ScaleError> {
    let payload: Vec<u8> = raw.iter().copied().filter(|b| *b != STX && *b != ETX).collect();
    let text = String::from_utf8(payload)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_owned()))
}

/// Convert the latest raw reading to a weight.
///
/// Integer readings are divided by 100. A missing or non-integer reading
/// yields `fallback`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reading_to_weight(latest: Option<&str>, fallback: f64) -> f64 {
    latest
        .and_then(|raw| raw.parse::<i64>().ok())
        .map_or(fallback, |hundredths| hundredths as f64 / READING_SCALE)
}

/// Read chunks of `read_size` bytes until the stream ends, recording each
/// cleaned reading into `latest`.
///
/// # Errors
///
/// Returns `ScaleError::Io` if a read fails.
pub async fn run_reader<R>(mut reader: R, read_size: usize, latest: LatestReading) -> Result<(), ScaleError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0_u8; read_size.max(1)];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            info!("scale: stream closed");
            return Ok(());
        }
        match clean_reading(&buf[..n]) {
            Ok(Some(reading)) => {
                debug!(%reading, "scale: reading");
                latest.set(reading).await;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "scale: discarded chunk"),
        }
    }
}

/// Spawn the background reader for the scale attached at `device`.
pub fn spawn_scale_task(device: PathBuf, read_size: usize, latest: LatestReading) -> JoinHandle<()> {
    tokio::spawn(async move {
        let file = match tokio::fs::File::open(&device).await {
            Ok(file) => file,
            Err(e) => {
                error!(error = %e, device = %device.display(), "scale: failed to open device");
                return;
            }
        };
        info!(device = %device.display(), read_size, "scale: reader started");
        if let Err(e) = run_reader(file, read_size, latest).await {
            error!(error = %e, device = %device.display(), "scale: communication error");
        }
    })
}

#[cfg(test)]
#[path = "scale_test.rs"]
mod tests;
