use std::collections::VecDeque;

use crate::{Error, Result};

/// A fixed-capacity ring buffer of interleaved PCM samples, used to bridge
/// the gap between decoded-audio arrival (bursty, one group at a time) and
/// playback consumption (a steady pull from the audio output device).
///
/// Writes carry a timestamp (microseconds, same origin as [`hang::Timestamp`])
/// which is mapped onto an absolute sample index so that:
/// - **Gaps** between non-contiguous writes are filled with silence rather
///   than splicing unrelated audio together.
/// - **Late arrivals** (a write whose slot has already been read out) are
///   dropped instead of corrupting already-played audio.
/// - **Refill**: when the buffer runs dry, [`Self::read`] pads with silence
///   rather than blocking, so a slow network doesn't stall the output device.
///   The buffer also starts in a pre-roll refilling state and won't hand out
///   real samples until it has filled to capacity at least once.
/// - **Overflow discard**: [`Self::write`] drops the oldest samples rather
///   than growing past `capacity`, so a burst after a stall doesn't
///   introduce unbounded latency.
pub struct Ring {
	samples: VecDeque<f32>,
	capacity: usize,
	channel_count: usize,
	sample_rate: u32,
	origin_us: Option<u64>,
	/// Absolute frame index of the oldest sample still buffered (advances as [`Self::read`] drains).
	base_frame: u64,
	/// Absolute frame index one past the newest sample written so far.
	next_frame: u64,
	/// True before the buffer has ever filled to capacity, and again on any underrun after that.
	refilling: bool,
}

impl Ring {
	pub fn new(capacity_frames: usize, channel_count: usize, sample_rate: u32) -> Self {
		Self {
			samples: VecDeque::with_capacity(capacity_frames * channel_count),
			capacity: capacity_frames * channel_count,
			channel_count,
			sample_rate,
			origin_us: None,
			base_frame: 0,
			next_frame: 0,
			refilling: true,
		}
	}

	/// Append interleaved samples timestamped at `ts_us`, zero-filling any
	/// gap since the previous write and discarding the oldest frames if the
	/// buffer would otherwise exceed capacity. Writes mapped to a slot
	/// already consumed by [`Self::read`] are silently dropped.
	pub fn write(&mut self, ts_us: u64, samples: &[f32]) -> Result<()> {
		if samples.len() % self.channel_count != 0 {
			return Err(Error::BufferMismatch {
				expected: self.channel_count,
				actual: samples.len(),
			});
		}
		let frames = samples.len() / self.channel_count;
		if frames == 0 {
			return Ok(());
		}

		let origin_us = *self.origin_us.get_or_insert(ts_us);
		let elapsed_us = ts_us.saturating_sub(origin_us) as u128;
		let target = (elapsed_us * self.sample_rate as u128 / 1_000_000) as u64;

		if target < self.base_frame {
			return Ok(());
		}

		let target = target.max(self.next_frame);
		let gap = ((target - self.next_frame) as usize) * self.channel_count;
		self.samples.extend(std::iter::repeat(0.0).take(gap));
		self.samples.extend(samples.iter().copied());
		self.next_frame = target + frames as u64;

		let overflow = self.samples.len().saturating_sub(self.capacity);
		if overflow > 0 {
			let drop = (overflow / self.channel_count) * self.channel_count;
			self.samples.drain(..drop);
			self.base_frame += (drop / self.channel_count) as u64;
		}

		if self.refilling && self.samples.len() >= self.capacity {
			self.refilling = false;
		}

		Ok(())
	}

	/// Read exactly `frame_count` frames, padding with silence (and marking
	/// the buffer as refilling) if fewer are available. Returns all silence
	/// without draining anything while still in the pre-roll refilling state.
	pub fn read(&mut self, frame_count: usize) -> Vec<f32> {
		let wanted = frame_count * self.channel_count;

		if self.refilling {
			return vec![0.0; wanted];
		}

		let available = self.samples.len().min(wanted);
		let mut out: Vec<f32> = self.samples.drain(..available).collect();
		self.base_frame += (available / self.channel_count) as u64;

		if available < wanted {
			self.refilling = true;
			out.resize(wanted, 0.0);
		}

		out
	}

	pub fn is_refilling(&self) -> bool {
		self.refilling
	}

	pub fn buffered_frames(&self) -> usize {
		self.samples.len() / self.channel_count
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn refilling_until_capacity_reached() {
		let mut ring = Ring::new(2, 2, 48_000);
		ring.write(0, &[1.0, 2.0]).unwrap(); // 1 of 2 frames, short of capacity
		assert!(ring.is_refilling());
		assert_eq!(ring.read(1), vec![0.0, 0.0]); // pre-roll: no real output yet

		ring.write(21, &[3.0, 4.0]).unwrap(); // second frame lands right after the first, reaching capacity
		assert!(!ring.is_refilling());
		assert_eq!(ring.read(2), vec![1.0, 2.0, 3.0, 4.0]);
	}

	#[test]
	fn zero_fills_gap_between_writes() {
		let mut ring = Ring::new(4, 1, 1); // 1 Hz, so each second is one frame
		ring.write(0, &[1.0]).unwrap();
		ring.write(3_000_000, &[2.0]).unwrap(); // 3s later, a 2-frame gap
		assert!(!ring.is_refilling());
		assert_eq!(ring.read(4), vec![1.0, 0.0, 0.0, 2.0]);
	}

	#[test]
	fn discards_oldest_on_overflow() {
		let mut ring = Ring::new(2, 1, 1);
		ring.write(0, &[1.0, 2.0, 3.0, 4.0]).unwrap(); // 4 frames into a 2-frame ring
		assert_eq!(ring.buffered_frames(), 2);
		assert_eq!(ring.read(2), vec![3.0, 4.0]);
	}

	#[test]
	fn drops_late_arriving_write_after_its_slot_was_read() {
		let mut ring = Ring::new(2, 1, 1);
		ring.write(0, &[1.0]).unwrap();
		ring.write(1_000_000, &[2.0]).unwrap(); // capacity reached
		assert!(!ring.is_refilling());
		let _ = ring.read(2); // drains both frames, base_frame advances past them

		ring.write(0, &[9.0]).unwrap(); // maps back to frame 0, already consumed
		assert_eq!(ring.buffered_frames(), 0);
	}

	#[test]
	fn pads_partial_output_after_preroll_underrun() {
		let mut ring = Ring::new(2, 1, 1);
		ring.write(0, &[1.0]).unwrap();
		ring.write(1_000_000, &[2.0]).unwrap(); // capacity reached, pre-roll clears
		let _ = ring.read(2); // drains fully

		ring.write(2_000_000, &[3.0]).unwrap(); // only one frame arrives
		let out = ring.read(2);
		assert_eq!(out, vec![3.0, 0.0]);
		assert!(ring.is_refilling());
	}

	#[test]
	fn rejects_misaligned_write() {
		let mut ring = Ring::new(4, 2, 48_000);
		assert!(ring.write(0, &[1.0, 2.0, 3.0]).is_err());
	}
}
