// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Consumer side of a bridge: the loop that invokes the handler, and the finalizer that
//! tears the bridge down once the producer has released the queue.

use std::{any::Any, thread::JoinHandle};

use tokio::sync::oneshot;

use super::{BridgeError, BridgeSummary, CompletionResult, ProducerExit, RecordHandler,
            SafeCallReceiver};

/// Everything the finalizer needs, and nothing else.
///
/// Created by [`create_bridge()`] right after the producer thread is spawned, moved
/// into the consumer task, and consumed by [`finalize()`]. The producer thread never
/// touches it: the only hand-off between the two is the queue closing, followed by the
/// join in [`finalize()`]. So there is no lock.
///
/// [`create_bridge()`]: super::create_bridge
/// [`finalize()`]: Self::finalize
#[derive(Debug)]
pub struct BridgeContext {
    completion_tx: oneshot::Sender<CompletionResult>,
    producer_thread: JoinHandle<ProducerExit>,
    generation: u32,
}

impl BridgeContext {
    #[must_use]
    pub fn new(
        completion_tx: oneshot::Sender<CompletionResult>,
        producer_thread: JoinHandle<ProducerExit>,
        generation: u32,
    ) -> Self {
        Self {
            completion_tx,
            producer_thread,
            generation,
        }
    }

    /// Runs once, on the consumer thread, after the queue reported closed:
    /// 1. join the producer thread,
    /// 2. resolve the completion signal,
    /// 3. drop the context.
    ///
    /// The join does not stall the consumer: the producer released its sender as the
    /// very last thing it did, after dropping the fetcher, so it is already on its way
    /// out.
    pub fn finalize(self) {
        let Self {
            completion_tx,
            producer_thread,
            generation,
        } = self;

        // 1.
        let outcome = match producer_thread.join() {
            Ok(ProducerExit::EndOfStream { records_delivered }) => Ok(BridgeSummary {
                records_delivered,
                generation,
            }),
            Ok(ProducerExit::UpstreamFailed {
                records_delivered,
                report,
            }) => Err(BridgeError::UpstreamFailed {
                records_delivered,
                report,
            }),
            Err(payload) => Err(BridgeError::ProducerPanicked {
                message: panic_message(payload.as_ref()),
            }),
        };

        tracing::debug!(
            message = "bridge finalizer: producer joined",
            generation,
            is_ok = outcome.is_ok()
        );

        // 2. The caller may have dropped its handle, that's fine.
        drop(completion_tx.send(outcome));

        // 3. Everything left in the context is dropped here.
    }
}

/// Invokes the handler for each record until the queue is closed and drained, then
/// finalizes. Spawned with [`tokio::task::spawn_local()`], so the handler never leaves
/// the consumer thread.
///
/// It is spawned before the producer thread exists, so the [`BridgeContext`] arrives
/// later through `context_rx`, always before the first record. If it never arrives,
/// [`create_bridge()`] bailed out before spawning the producer, and there is nothing to
/// finalize.
///
/// If this task is dropped before the queue closes, the context is dropped without
/// finalizing: the completion resolves to [`BridgeError::ConsumerDropped`] and the
/// producer's next push fails, which is fatal.
///
/// [`create_bridge()`]: super::create_bridge
pub async fn run_consumer_loop<R, H>(
    mut receiver: SafeCallReceiver<R>,
    mut handler: H,
    context_rx: oneshot::Receiver<BridgeContext>,
) where
    H: RecordHandler<R>,
{
    while let Some(call) = receiver.recv().await {
        call.invoke(&mut handler);
    }
    if let Ok(context) = context_rx.await {
        context.finalize();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(it) = payload.downcast_ref::<&str>() {
        (*it).to_string()
    } else if let Some(it) = payload.downcast_ref::<String>() {
        it.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion_signal;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_finalize_resolves_after_join() {
        let (completion_tx, completion) = completion_signal();
        let producer_thread = std::thread::spawn(|| ProducerExit::EndOfStream {
            records_delivered: 4,
        });

        BridgeContext::new(completion_tx, producer_thread, 11).finalize();

        assert_eq!(
            completion.await.unwrap(),
            BridgeSummary {
                records_delivered: 4,
                generation: 11
            }
        );
    }

    #[tokio::test]
    async fn test_finalize_reports_panic() {
        let (completion_tx, completion) = completion_signal();
        let producer_thread = std::thread::spawn(|| -> ProducerExit {
            panic!("upstream went sideways");
        });

        BridgeContext::new(completion_tx, producer_thread, 1).finalize();

        match completion.await {
            Err(BridgeError::ProducerPanicked { message }) => {
                assert_eq!(message, "upstream went sideways");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_panic_message_from_string_payload() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted 42"));
        assert_eq!(panic_message(payload.as_ref()), "formatted 42");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
