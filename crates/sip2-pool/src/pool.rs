//! Fixed-size ring of persistent TCP connections to one ACS.
//!
//! The source pool swaps an `unsafe.Pointer` slot directly; this keeps the
//! same "rotate an index, spin if the slot you land on is checked out"
//! shape with safe primitives: an [`AtomicUsize`] cursor picks the next
//! slot, and each slot is a `tokio::sync::Mutex<Option<TcpStream>>` — `None`
//! while a connection is checked out, `Some` once it's returned.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::{watch, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("dial {0} timed out")]
    ConnectTimeout(SocketAddr),
    #[error("dial {addr}: {source}")]
    Connect { addr: SocketAddr, #[source] source: std::io::Error },
    #[error("pool close cancelled after closing {closed} of {total} connections")]
    CloseCancelled { closed: usize, total: usize },
}

pub struct ConnectionPool {
    slots: Vec<Mutex<Option<TcpStream>>>,
    take_index: AtomicUsize,
    addr: SocketAddr,
    connect_timeout: Duration,
}

impl ConnectionPool {
    /// Dial `size` connections up front; a pool that can't fill every slot
    /// at startup fails closed rather than serving from a degraded ring.
    pub async fn connect(addr: SocketAddr, size: usize, connect_timeout: Duration) -> Result<Self, PoolError> {
        let mut slots = Vec::with_capacity(size);
        for _ in 0..size {
            slots.push(Mutex::new(Some(dial(addr, connect_timeout).await?)));
        }
        Ok(ConnectionPool { slots, take_index: AtomicUsize::new(0), addr, connect_timeout })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Claim the next slot in rotation, spinning with a cooperative yield
    /// while it's checked out by another caller.
    pub async fn acquire(&self) -> PooledConnection<'_> {
        loop {
            let idx = self.take_index.fetch_add(1, Ordering::Relaxed) % self.slots.len();
            let mut guard = self.slots[idx].lock().await;
            if let Some(stream) = guard.take() {
                return PooledConnection { pool: self, idx, stream: Some(stream) };
            }
            drop(guard);
            tokio::task::yield_now().await;
        }
    }

    async fn redial(&self) -> Result<TcpStream, PoolError> {
        dial(self.addr, self.connect_timeout).await
    }

    /// Repeatedly acquire a slot and close its connection until every slot
    /// has been closed, or `cancel` fires first. Mirrors the source pool's
    /// `Close(ctx)`, which pops and closes connections in a `select` loop
    /// with a non-blocking default case, checking `ctx.Done()` once per
    /// iteration rather than racing it against the close itself.
    ///
    /// A closed slot is left empty rather than reconnected — once `close`
    /// returns `Ok`, the pool is spent and must not be used again.
    pub async fn close(&self, cancel: &watch::Receiver<bool>) -> Result<(), PoolError> {
        let total = self.slots.len();
        for closed in 0..total {
            if *cancel.borrow() {
                return Err(PoolError::CloseCancelled { closed, total });
            }
            let mut conn = self.acquire().await;
            if let Some(mut stream) = conn.stream.take() {
                let _ = stream.shutdown().await;
            }
        }
        Ok(())
    }
}

async fn dial(addr: SocketAddr, timeout: Duration) -> Result<TcpStream, PoolError> {
    let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
        .await
        .map_err(|_| PoolError::ConnectTimeout(addr))?
        .map_err(|source| PoolError::Connect { addr, source })?;
    let _ = stream.set_nodelay(true);
    Ok(stream)
}

/// A connection checked out of the pool. Must be given back via
/// [`PooledConnection::release`] or [`PooledConnection::release_reconnected`]
/// — dropping it without releasing leaves its slot permanently empty.
pub struct PooledConnection<'a> {
    pool: &'a ConnectionPool,
    idx: usize,
    stream: Option<TcpStream>,
}

impl PooledConnection<'_> {
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        self.stream.as_mut().expect("stream taken before release")
    }

    /// Return the connection to its slot as-is; it's still good.
    pub async fn release(mut self) {
        let stream = self.stream.take().expect("stream taken before release");
        *self.pool.slots[self.idx].lock().await = Some(stream);
    }

    /// The connection is dead (fatal I/O error). Dial a replacement and
    /// hand it back into the same slot.
    pub async fn release_reconnected(mut self) -> Result<(), PoolError> {
        self.stream.take();
        let fresh = self.pool.redial().await?;
        *self.pool.slots[self.idx].lock().await = Some(fresh);
        Ok(())
    }

    /// Swap in a freshly-dialed connection without giving up the checkout —
    /// used mid-communicate when a fatal error forces a reconnect but the
    /// caller still needs to keep using this slot for a retry.
    pub async fn reconnect_in_place(&mut self) -> Result<(), PoolError> {
        self.stream = Some(self.pool.redial().await?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn accepting_listener() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                if let Ok((socket, _)) = listener.accept().await {
                    // Keep the connection open; this test only exercises
                    // pool bookkeeping, not ACS behavior.
                    std::mem::forget(socket);
                }
            }
        });
        addr
    }

    #[tokio::test]
    async fn acquire_and_release_round_trips_the_same_slot_count() {
        let addr = accepting_listener().await;
        let pool = ConnectionPool::connect(addr, 2, Duration::from_secs(1)).await.unwrap();
        let a = pool.acquire().await;
        let b = pool.acquire().await;
        a.release().await;
        b.release().await;
        assert_eq!(pool.len(), 2);
    }

    #[tokio::test]
    async fn close_drains_every_slot_when_never_cancelled() {
        let addr = accepting_listener().await;
        let pool = ConnectionPool::connect(addr, 3, Duration::from_secs(1)).await.unwrap();
        let (_tx, rx) = watch::channel(false);
        pool.close(&rx).await.unwrap();
    }

    #[tokio::test]
    async fn close_returns_a_partial_close_error_when_cancelled_up_front() {
        let addr = accepting_listener().await;
        let pool = ConnectionPool::connect(addr, 3, Duration::from_secs(1)).await.unwrap();
        let (_tx, rx) = watch::channel(true);
        let err = pool.close(&rx).await.unwrap_err();
        assert!(matches!(err, PoolError::CloseCancelled { closed: 0, total: 3 }));
    }
}
