//! Bounded delivery queue between the row dispatcher and a background consumer.
//!
//! Delivery is best-effort: the consumer polls without blocking and is never
//! joined, so values still queued when the process exits are lost. Callers
//! can only rely on `observed() <= produced()`.

use crate::value::DecodedValue;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const QUEUE_CAPACITY: usize = 10;

#[derive(Debug, Default)]
struct Counters {
    produced: AtomicUsize,
    observed: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct DeliverySender {
    tx: mpsc::Sender<DecodedValue>,
    counters: Arc<Counters>,
}

#[derive(Debug)]
pub struct DeliveryReceiver {
    rx: mpsc::Receiver<DecodedValue>,
    counters: Arc<Counters>,
}

pub fn delivery_queue(capacity: usize) -> (DeliverySender, DeliveryReceiver) {
    let (tx, rx) = mpsc::channel::<DecodedValue>(capacity.max(1));
    let counters = Arc::new(Counters::default());
    (
        DeliverySender {
            tx,
            counters: counters.clone(),
        },
        DeliveryReceiver { rx, counters },
    )
}

impl DeliverySender {
    /// Waits for room when the queue is full. A gone consumer only costs the value.
    pub async fn deliver(&self, value: DecodedValue) {
        match self.tx.reserve().await {
            Ok(permit) => {
                // counted before the consumer can see it
                self.counters.produced.fetch_add(1, Ordering::Relaxed);
                permit.send(value);
            }
            Err(_) => warn!("delivery queue closed, dropping {value}"),
        }
    }

    pub fn produced(&self) -> usize {
        self.counters.produced.load(Ordering::Relaxed)
    }

    pub fn observed(&self) -> usize {
        self.counters.observed.load(Ordering::Relaxed)
    }
}

impl DeliveryReceiver {
    /// Non-blocking poll; `Ok(None)` means nothing is queued right now.
    pub fn poll(&mut self) -> Result<Option<DecodedValue>, TryRecvError> {
        match self.rx.try_recv() {
            Ok(value) => {
                self.counters.observed.fetch_add(1, Ordering::Relaxed);
                Ok(Some(value))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Spawn the background drain task. It spins on `poll`, yielding when empty,
/// and stops only once every sender is dropped and the queue is empty.
pub fn spawn_consumer(mut receiver: DeliveryReceiver) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.poll() {
                Ok(Some(value)) => info!("delivered: {value}, {}", value.kind()),
                Ok(None) => tokio::task::yield_now().await,
                Err(_) => break,
            }
        }
    })
}
