//! Lock-free ring buffer for captured samples
//!
//! Carries signed 16-bit samples from the capture callback to the
//! processing thread without blocking either side.

use ringbuf::{HeapConsumer, HeapProducer, HeapRb};

/// Thread-safe sample ring buffer
pub struct SampleRingBuffer {
    producer: HeapProducer<i16>,
    consumer: HeapConsumer<i16>,
    capacity: usize,
}

impl SampleRingBuffer {
    /// Create a ring buffer holding up to `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<i16>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Split into producer and consumer ends.
    pub fn split(self) -> (SampleProducer, SampleConsumer) {
        (
            SampleProducer {
                producer: self.producer,
            },
            SampleConsumer {
                consumer: self.consumer,
                capacity: self.capacity,
            },
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Producer end, written from the capture callback.
pub struct SampleProducer {
    producer: HeapProducer<i16>,
}

impl SampleProducer {
    /// Write samples, returning how many fit. A full buffer drops the
    /// tail rather than blocking the audio callback.
    pub fn write(&mut self, samples: &[i16]) -> usize {
        self.producer.push_slice(samples)
    }

    pub fn free_len(&self) -> usize {
        self.producer.free_len()
    }
}

/// Consumer end, drained by the processing thread.
pub struct SampleConsumer {
    consumer: HeapConsumer<i16>,
    capacity: usize,
}

impl SampleConsumer {
    /// Pop exactly one block of `block.len()` samples, but only when a
    /// whole block is available. Returns false without draining anything
    /// otherwise, so blocks keep their fixed transform length.
    pub fn pop_block(&mut self, block: &mut [i16]) -> bool {
        if self.consumer.len() < block.len() {
            return false;
        }

        let read = self.consumer.pop_slice(block);
        debug_assert_eq!(read, block.len());
        true
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
