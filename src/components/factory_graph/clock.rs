use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Wall-clock source for node ids and export timestamps.
pub trait Clock: Send + Sync {
	fn now_millis(&self) -> u64;
}

/// Browser clock on wasm, system clock elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	#[cfg(target_arch = "wasm32")]
	fn now_millis(&self) -> u64 {
		js_sys::Date::now() as u64
	}

	#[cfg(not(target_arch = "wasm32"))]
	fn now_millis(&self) -> u64 {
		std::time::SystemTime::now()
			.duration_since(std::time::UNIX_EPOCH)
			.map(|d| d.as_millis() as u64)
			.unwrap_or_default()
	}
}

#[derive(Clone)]
pub struct SharedClock(Arc<dyn Clock>);

impl SharedClock {
	pub fn new(clock: impl Clock + 'static) -> Self {
		Self(Arc::new(clock))
	}

	pub fn now_millis(&self) -> u64 {
		self.0.now_millis()
	}
}

impl Default for SharedClock {
	fn default() -> Self {
		Self::new(SystemClock)
	}
}

impl fmt::Debug for SharedClock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SharedClock")
	}
}

/// ISO-8601 rendering of an epoch-millisecond instant.
pub fn iso_timestamp(millis: u64) -> String {
	OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
		.ok()
		.and_then(|t| t.format(&Rfc3339).ok())
		.unwrap_or_else(|| "1970-01-01T00:00:00Z".to_string())
}

#[cfg(test)]
pub(crate) mod tests {
	use std::sync::atomic::{AtomicU64, Ordering};

	use super::*;

	/// Deterministic clock that advances one millisecond per reading.
	#[derive(Debug)]
	pub struct StepClock(AtomicU64);

	impl StepClock {
		pub fn starting_at(millis: u64) -> Self {
			Self(AtomicU64::new(millis))
		}
	}

	impl Clock for StepClock {
		fn now_millis(&self) -> u64 {
			self.0.fetch_add(1, Ordering::SeqCst)
		}
	}

	#[test]
	fn formats_epoch_millis_as_rfc3339() {
		assert_eq!(iso_timestamp(0), "1970-01-01T00:00:00Z");
		assert_eq!(iso_timestamp(1_700_000_000_123), "2023-11-14T22:13:20.123Z");
	}

	#[test]
	fn step_clock_advances() {
		let clock = SharedClock::new(StepClock::starting_at(10));
		assert_eq!(clock.now_millis(), 10);
		assert_eq!(clock.now_millis(), 11);
	}
}
