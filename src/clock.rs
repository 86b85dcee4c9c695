//! Monotonic time capability used to bound busy-wait loops.

/// A free-running millisecond counter.
///
/// The driver only compares differences between readings, so the epoch is
/// arbitrary and wrap-around at `u32::MAX` is tolerated (about 49 days).
/// On bare-metal targets this is typically backed by a hardware timer or a
/// SysTick-driven counter.
pub trait Monotonic {
    /// Milliseconds elapsed since some fixed, arbitrary point in the past.
    fn now_ms(&mut self) -> u32;
}

impl<T: Monotonic + ?Sized> Monotonic for &mut T {
    fn now_ms(&mut self) -> u32 {
        T::now_ms(self)
    }
}

/// A deterministic clock for unit tests: every reading advances the
/// reported time by a fixed step.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct FakeClock {
    now: u32,
    step: u32,
}

#[cfg(test)]
impl FakeClock {
    pub fn stepping(step: u32) -> Self {
        FakeClock { now: 0, step }
    }
}

#[cfg(test)]
impl Monotonic for FakeClock {
    fn now_ms(&mut self) -> u32 {
        let reading = self.now;
        self.now = self.now.wrapping_add(self.step);
        reading
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{FakeClock, Monotonic};

    #[test]
    fn fake_clock_steps() {
        let mut clock = FakeClock::stepping(250);
        assert_eq!(clock.now_ms(), 0);
        assert_eq!(clock.now_ms(), 250);
        assert_eq!(clock.now_ms(), 500);
    }

    #[test]
    fn elapsed_survives_wrap() {
        let mut clock = FakeClock {
            now: u32::MAX - 100,
            step: 300,
        };
        let started = clock.now_ms();
        assert_eq!(clock.now_ms().wrapping_sub(started), 300);
    }
}
