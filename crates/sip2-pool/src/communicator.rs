//! Reliable request/response exchange over a pooled connection: encode
//! once, then retry writes and reads against transient I/O failures,
//! reconnect on fatal ones, and loop back on an ACS "please resend".

use std::time::Duration;

use sip2_protocol::{ACS_RESEND_COMMAND_ID, ChecksumError, FrameError, MessageSchema, MessageValues};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use crate::pool::{ConnectionPool, PoolError};

#[derive(Debug, Clone, Copy)]
pub struct CommunicatorOptions {
    pub io_timeout: Duration,
    pub write_retries: u32,
    pub read_retries: u32,
    /// Whether a corrupted checksum on a response frame is fatal. When
    /// `false`, a frame that fails checksum verification is decoded anyway
    /// instead of being rejected.
    pub error_detection: bool,
}

impl Default for CommunicatorOptions {
    fn default() -> Self {
        CommunicatorOptions {
            io_timeout: Duration::from_secs(5),
            write_retries: 3,
            read_retries: 3,
            error_detection: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommunicatorError {
    #[error("write to ACS failed after retries: {0}")]
    Write(#[source] std::io::Error),
    #[error("read from ACS failed after retries: {0}")]
    Read(#[source] std::io::Error),
    #[error("reconnect to ACS failed: {0}")]
    Reconnect(#[from] PoolError),
    #[error(transparent)]
    Checksum(#[from] ChecksumError),
    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// A read chunk size matching the source client's own 128-byte reads.
const READ_CHUNK: usize = 128;

/// Send `request_bytes` (a fully encoded, checksummed frame) and return the
/// decoded response. Transparently resends the same bytes if the ACS
/// answers with an SC Resend Request (command id `96`).
pub async fn reliable_communicate(
    pool: &ConnectionPool,
    request_bytes: &[u8],
    opts: &CommunicatorOptions,
) -> Result<(&'static MessageSchema, MessageValues), CommunicatorError> {
    let mut conn = pool.acquire().await;

    let result = 'resend: loop {
        write_phase(&mut conn, request_bytes, opts).await?;
        let raw = match read_phase(&mut conn, opts).await {
            Ok(raw) => raw,
            Err(err) => break 'resend Err(err),
        };

        if opts.error_detection {
            if let Err(err) = sip2_protocol::verify_checksum(&raw) {
                break 'resend Err(CommunicatorError::from(err));
            }
        }
        let (schema, values) = sip2_protocol::decode_response(&raw, sip2_protocol::response_schema_by_command_id)?;
        if schema.command_id == ACS_RESEND_COMMAND_ID {
            debug!("ACS requested resend, retransmitting the same frame");
            continue 'resend;
        }
        break 'resend Ok((schema, values));
    };

    conn.release().await;
    result
}

/// Bounded write-retry: transient errors and fatal reconnects both count
/// against `write_retries` — at most `write_retries` total write attempts
/// per call, mirroring the source client's `for i := 0; i < p.retryTimes;
/// i++` outer loop, where every continuation (transient or reconnect)
/// consumes one of the `retryTimes` iterations.
async fn write_phase(
    conn: &mut crate::pool::PooledConnection<'_>,
    bytes: &[u8],
    opts: &CommunicatorOptions,
) -> Result<(), CommunicatorError> {
    let mut attempt = 0u32;
    loop {
        let outcome = tokio::time::timeout(opts.io_timeout, conn.stream_mut().write_all(bytes)).await;
        match outcome {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(err)) if is_transient(&err) && attempt < opts.write_retries => {
                attempt += 1;
                warn!(attempt, "transient write error, retrying");
                continue;
            }
            Ok(Err(err)) if is_transient(&err) => {
                return Err(CommunicatorError::Write(err));
            }
            Ok(Err(err)) if attempt < opts.write_retries => {
                attempt += 1;
                warn!(attempt, %err, "fatal write error, reconnecting");
                conn.reconnect_in_place().await?;
                continue;
            }
            Ok(Err(err)) => {
                warn!(%err, "fatal write error, out of retries");
                return Err(CommunicatorError::Write(err));
            }
            Err(_elapsed) => {
                if attempt < opts.write_retries {
                    attempt += 1;
                    continue;
                }
                return Err(CommunicatorError::Write(std::io::Error::from(std::io::ErrorKind::TimedOut)));
            }
        }
    }
}

/// Bounded read-retry: transient errors are retried in place up to
/// `read_retries` times; a fatal error reconnects the slot so the *next*
/// call gets a fresh connection, but surfaces the original error for this
/// call without attempting a further read on the fresh connection — the
/// fresh connection is not reused for this call.
async fn read_phase(
    conn: &mut crate::pool::PooledConnection<'_>,
    opts: &CommunicatorOptions,
) -> Result<Vec<u8>, CommunicatorError> {
    let mut attempt = 0u32;
    let mut buf = Vec::new();
    loop {
        match read_until_newline(conn.stream_mut(), &mut buf, opts.io_timeout).await {
            Ok(()) => return Ok(buf),
            Err(err) if is_transient(&err) && attempt < opts.read_retries => {
                attempt += 1;
                warn!(attempt, "transient read error, retrying");
                buf.clear();
                continue;
            }
            Err(err) if is_transient(&err) => return Err(CommunicatorError::Read(err)),
            Err(original) => {
                warn!(%original, "fatal read error, reconnecting");
                conn.reconnect_in_place().await?;
                return Err(CommunicatorError::Read(original));
            }
        }
    }
}

async fn read_until_newline(
    stream: &mut tokio::net::TcpStream,
    buf: &mut Vec<u8>,
    timeout: Duration,
) -> std::io::Result<()> {
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let read = tokio::time::timeout(timeout, stream.read(&mut chunk))
            .await
            .map_err(|_| std::io::Error::from(std::io::ErrorKind::TimedOut))??;
        if read == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        }
        buf.extend_from_slice(&chunk[..read]);
        if chunk[..read].contains(&b'\n') {
            return Ok(());
        }
    }
}

fn is_transient(err: &std::io::Error) -> bool {
    matches!(err.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock | std::io::ErrorKind::Interrupted)
}

// Network scenario tests (S3-S6: resend, transient retry, fatal reconnect,
// corrupted checksum) live in `tests/communicator_scenarios.rs` against a
// mock TCP ACS, rather than in this module.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_out_and_would_block_are_transient_but_other_errors_are_not() {
        assert!(is_transient(&std::io::Error::from(std::io::ErrorKind::TimedOut)));
        assert!(is_transient(&std::io::Error::from(std::io::ErrorKind::WouldBlock)));
        assert!(is_transient(&std::io::Error::from(std::io::ErrorKind::Interrupted)));
        assert!(!is_transient(&std::io::Error::from(std::io::ErrorKind::BrokenPipe)));
        assert!(!is_transient(&std::io::Error::from(std::io::ErrorKind::ConnectionReset)));
    }
}
