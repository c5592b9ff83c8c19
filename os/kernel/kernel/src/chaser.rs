use crate::config::BlinkTiming;
use kernel_gpio::{GpioController, MicroDelay, Pin, SettleDelay};
use kernel_mmio::RegisterBus;
use kernel_sync::SignalReader;

/// Lights one LED at a time and moves along the row by the signal's value.
///
/// A signal of +1 walks forward at [`BlinkTiming::forward_us`]; -1 walks
/// backwards at the faster [`BlinkTiming::reverse_us`]. Both ends wrap.
#[derive(Debug)]
pub struct LedChaser<const LEDS: usize> {
    leds: [Pin; LEDS],
    position: usize,
    timing: BlinkTiming,
}

impl<const LEDS: usize> LedChaser<LEDS> {
    #[must_use]
    pub const fn new(leds: [Pin; LEDS], timing: BlinkTiming) -> Self {
        Self {
            leds,
            position: 0,
            timing,
        }
    }

    /// The LED the next blink lights, if there are any.
    #[must_use]
    pub fn current(&self) -> Option<Pin> {
        self.leds.get(self.position).copied()
    }

    #[must_use]
    pub const fn half_period_us(&self, signal: i32) -> u32 {
        if signal == 1 {
            self.timing.forward_us
        } else {
            self.timing.reverse_us
        }
    }

    /// Moves `step` LEDs along the row, wrapping at both ends.
    pub fn advance(&mut self, step: i32) {
        let (Ok(len), Ok(pos)) = (i64::try_from(LEDS), i64::try_from(self.position)) else {
            return;
        };
        if len == 0 {
            return;
        }
        let next = (pos + i64::from(step)).rem_euclid(len);
        self.position = usize::try_from(next).unwrap_or_default();
    }

    /// Lights the current LED for one half period, turns it off for another,
    /// then advances by the signal read at the start.
    pub fn blink<B, D, T>(&mut self, gpio: &GpioController<B, D>, timer: &T, signal: SignalReader<'_>)
    where
        B: RegisterBus,
        D: SettleDelay,
        T: MicroDelay,
    {
        let Some(led) = self.current() else {
            return;
        };
        let step = signal.get();
        let half_period = self.half_period_us(step);

        gpio.set_pin(led);
        log::trace!("LED {} on", led.number());
        timer.delay_us(half_period);
        gpio.clear_pin(led);
        timer.delay_us(half_period);

        self.advance(step);
    }
}
