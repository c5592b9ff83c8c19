use core::hint::spin_loop;
use kernel_mmio::RegisterBus;
use kernel_mmio::map::timer;

/// A fixed, short busy wait between steps of a register protocol.
pub trait SettleDelay {
    fn settle(&self);
}

/// Waits a number of microseconds.
pub trait MicroDelay {
    fn delay_us(&self, us: u32);
}

/// Busy loop of a fixed number of iterations.
///
/// This is instruction counting, not a timer: one iteration takes at least
/// one core cycle, so `cycles` is a lower bound on the elapsed cycles.
#[derive(Debug, Copy, Clone)]
pub struct SpinDelay {
    cycles: u32,
}

impl SpinDelay {
    /// Set-up and hold time the pull-up/down control signal needs.
    pub const PULL_SETTLE_CYCLES: u32 = 150;

    #[must_use]
    pub const fn new(cycles: u32) -> Self {
        Self { cycles }
    }

    #[must_use]
    pub const fn pull_settle() -> Self {
        Self::new(Self::PULL_SETTLE_CYCLES)
    }
}

impl SettleDelay for SpinDelay {
    #[inline]
    fn settle(&self) {
        for _ in 0..self.cycles {
            spin_loop();
        }
    }
}

impl<D: SettleDelay + ?Sized> SettleDelay for &D {
    fn settle(&self) {
        (**self).settle();
    }
}

/// Microsecond delays off the 1 MHz free-running system timer.
#[derive(Debug)]
pub struct SystemTimer<B> {
    bus: B,
}

impl<B: RegisterBus> SystemTimer<B> {
    #[must_use]
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Lower 32 bits of the microsecond counter.
    #[must_use]
    pub fn now(&self) -> u32 {
        self.bus.read(timer::CLO)
    }
}

impl<B: RegisterBus> MicroDelay for SystemTimer<B> {
    fn delay_us(&self, us: u32) {
        let start = self.now();
        // Wrapping subtraction keeps this correct across counter overflow.
        while self.now().wrapping_sub(start) < us {
            spin_loop();
        }
    }
}

impl<D: MicroDelay + ?Sized> MicroDelay for &D {
    fn delay_us(&self, us: u32) {
        (**self).delay_us(us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_mmio::sim::SimulatedBus;

    #[test]
    fn timer_waits_at_least_the_requested_ticks() {
        let bus = SimulatedBus::new();
        let t = SystemTimer::new(&bus);
        t.delay_us(25);
        // One read for the start, then one per loop iteration.
        assert!(bus.peek(timer::CLO) >= 26);
    }

    #[test]
    fn timer_survives_counter_wrap() {
        let bus = SimulatedBus::new();
        bus.poke(timer::CLO, u32::MAX - 3);
        let t = SystemTimer::new(&bus);
        t.delay_us(10);
        assert!(bus.peek(timer::CLO) < 20);
    }

    #[test]
    fn spin_delay_terminates() {
        SpinDelay::pull_settle().settle();
        SpinDelay::new(0).settle();
    }
}
