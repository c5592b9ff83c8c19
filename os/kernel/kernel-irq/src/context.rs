use crate::{PendingEvents, RouteError};
use kernel_gpio::{Bank, Pin};
use kernel_mmio::map::irq;
use kernel_mmio::regs::IrqPending2;
use kernel_mmio::InterruptSafe;
use kernel_sync::{SharedSignal, SignalWriter};

/// Associates a pin's rising edge with the value to publish.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EdgeRoute {
    pub pin: Pin,
    pub outcome: i32,
}

impl EdgeRoute {
    #[must_use]
    pub const fn new(pin: Pin, outcome: i32) -> Self {
        Self { pin, outcome }
    }
}

/// What one dispatch call did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dispatch {
    /// The GPIO summary line was not asserted; nothing was touched.
    NotGpio,
    /// The summary line was asserted but no event status bit was set.
    Idle,
    /// One routed pin fired; its bit was cleared and `outcome` published.
    Delivered { pin: Pin, outcome: i32 },
    /// Several routed pins fired at once. Their bits were cleared and the
    /// signal was left unchanged.
    Suppressed(PendingEvents),
    /// Only unrouted pins fired. `cleared` had edge detection enabled and
    /// were acknowledged, `left` are still latched.
    Unrecognized {
        cleared: PendingEvents,
        left: PendingEvents,
    },
}

/// State owned by the IRQ handler.
pub struct IrqContext<'a, B> {
    bus: B,
    routes: &'a [EdgeRoute],
    routed: PendingEvents,
    signal: SignalWriter<'a>,
}

impl<'a, B: InterruptSafe> IrqContext<'a, B> {
    /// Claims `signal`'s writer and validates the routes.
    ///
    /// # Errors
    /// [`RouteError::DuplicatePin`] if two routes name the same pin,
    /// [`RouteError::WriterTaken`] if the signal already has a writer.
    pub fn new(
        bus: B,
        routes: &'a [EdgeRoute],
        signal: &'a SharedSignal,
    ) -> Result<Self, RouteError> {
        let mut routed = PendingEvents::NONE;
        for route in routes {
            if routed.contains(route.pin) {
                log::error!("pin {} routed twice", route.pin.number());
                return Err(RouteError::DuplicatePin(route.pin.number()));
            }
            routed = routed.with(route.pin);
        }

        let signal = signal.claim_writer().ok_or(RouteError::WriterTaken)?;
        log::debug!("dispatching GPIO edges for pins {routed:?}");

        Ok(Self {
            bus,
            routes,
            routed,
            signal,
        })
    }

    /// Pins with a route.
    #[must_use]
    pub const fn routed(&self) -> PendingEvents {
        self.routed
    }

    /// Handles one GPIO interrupt.
    ///
    /// Never blocks and always returns.
    pub fn dispatch(&mut self) -> Dispatch {
        let pending = IrqPending2::from_bits(self.bus.read(irq::IRQ_PENDING_2));
        if !pending.gpio_int3() {
            return Dispatch::NotGpio;
        }

        let status = PendingEvents::read(&self.bus, Bank::event_status);
        if status.is_empty() {
            return Dispatch::Idle;
        }

        let hits = status.intersect(self.routed);
        let routes = self.routes;
        let mut fired = routes.iter().filter(|r| hits.contains(r.pin));
        match (fired.next().copied(), fired.next()) {
            (None, _) => {
                let armed = PendingEvents::read(&self.bus, Bank::rising_edge_enable);
                let cleared = status.intersect(armed);
                self.acknowledge(cleared);
                Dispatch::Unrecognized {
                    cleared,
                    left: status.without(cleared),
                }
            }
            (Some(route), None) => {
                self.acknowledge(hits);
                self.signal.publish(route.outcome);
                Dispatch::Delivered {
                    pin: route.pin,
                    outcome: route.outcome,
                }
            }
            (Some(_), Some(_)) => {
                self.acknowledge(hits);
                Dispatch::Suppressed(hits)
            }
        }
    }

    /// Writes exactly `events` to the status registers.
    fn acknowledge(&self, events: PendingEvents) {
        for bank in Bank::ALL {
            let word = events.bank(bank);
            if word != 0 {
                self.bus.write(bank.event_status(), word);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_mmio::map::gpio;
    use kernel_mmio::sim::SimulatedBus;

    const BUTTON_A: u8 = 23;
    const BUTTON_B: u8 = 22;

    fn pin(n: u8) -> Pin {
        Pin::new(n).unwrap()
    }

    fn routes() -> [EdgeRoute; 2] {
        [
            EdgeRoute::new(pin(BUTTON_A), -1),
            EdgeRoute::new(pin(BUTTON_B), 1),
        ]
    }

    fn raise(bus: &SimulatedBus, status0: u32) {
        bus.poke(irq::IRQ_PENDING_2, 1 << IrqPending2::GPIO_SUMMARY_BIT);
        bus.poke(gpio::GPEDS0, status0);
    }

    #[test]
    fn ignores_non_gpio_interrupts() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(1);
        let routes = routes();
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        bus.poke(gpio::GPEDS0, 1 << BUTTON_A);
        assert_eq!(ctx.dispatch(), Dispatch::NotGpio);
        assert_eq!(bus.peek(gpio::GPEDS0), 1 << BUTTON_A);
        assert!(bus.writes().is_empty());
        assert_eq!(signal.reader().get(), 1);
    }

    #[test]
    fn button_a_publishes_minus_one() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(1);
        let routes = routes();
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        raise(&bus, 1 << BUTTON_A);
        assert_eq!(
            ctx.dispatch(),
            Dispatch::Delivered {
                pin: pin(BUTTON_A),
                outcome: -1
            }
        );
        assert_eq!(bus.peek(gpio::GPEDS0), 0);
        assert_eq!(bus.writes_to(gpio::GPEDS0), [1 << BUTTON_A]);
        assert_eq!(signal.reader().get(), -1);
    }

    #[test]
    fn button_b_publishes_plus_one() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(-1);
        let routes = routes();
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        raise(&bus, 1 << BUTTON_B);
        ctx.dispatch();
        assert_eq!(signal.reader().get(), 1);
    }

    #[test]
    fn unrelated_bits_survive_a_delivery() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(1);
        let routes = routes();
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        raise(&bus, (1 << BUTTON_A) | (1 << 5));
        ctx.dispatch();
        assert_eq!(bus.peek(gpio::GPEDS0), 1 << 5);
    }

    #[test]
    fn delivers_the_route_of_a_bank_one_pin() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(1);
        let routes = [EdgeRoute::new(pin(BUTTON_A), -1), EdgeRoute::new(pin(40), 7)];
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        raise(&bus, 0);
        bus.poke(gpio::GPEDS1, 1 << (40 - 32));
        assert_eq!(
            ctx.dispatch(),
            Dispatch::Delivered {
                pin: pin(40),
                outcome: 7
            }
        );
        assert_eq!(bus.peek(gpio::GPEDS1), 0);
        assert!(bus.writes_to(gpio::GPEDS0).is_empty());
        assert_eq!(signal.reader().get(), 7);
    }

    #[test]
    fn simultaneous_buttons_are_suppressed() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(1);
        let routes = routes();
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        raise(&bus, (1 << BUTTON_A) | (1 << BUTTON_B));
        let both = PendingEvents::NONE.with(pin(BUTTON_A)).with(pin(BUTTON_B));
        assert_eq!(ctx.dispatch(), Dispatch::Suppressed(both));
        assert_eq!(bus.peek(gpio::GPEDS0), 0);
        assert_eq!(signal.reader().get(), 1);
    }

    #[test]
    fn stray_events_clear_only_when_detection_is_enabled() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(1);
        let routes = routes();
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        bus.poke(gpio::GPREN0, 1 << 7);
        raise(&bus, (1 << 7) | (1 << 8));
        assert_eq!(
            ctx.dispatch(),
            Dispatch::Unrecognized {
                cleared: PendingEvents::from_bits(1 << 7),
                left: PendingEvents::from_bits(1 << 8),
            }
        );
        assert_eq!(bus.peek(gpio::GPEDS0), 1 << 8);
        assert_eq!(signal.reader().get(), 1);
    }

    #[test]
    fn empty_status_is_idle() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(1);
        let routes = routes();
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        raise(&bus, 0);
        assert_eq!(ctx.dispatch(), Dispatch::Idle);
        assert!(bus.writes().is_empty());
    }

    #[test]
    fn bank_one_pins_are_routed() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(0);
        let routes = [EdgeRoute::new(pin(40), 7)];
        let mut ctx = IrqContext::new(&bus, &routes, &signal).unwrap();

        bus.poke(irq::IRQ_PENDING_2, 1 << IrqPending2::GPIO_SUMMARY_BIT);
        bus.poke(gpio::GPEDS1, (1 << 8) | (1 << 1));
        ctx.dispatch();
        assert_eq!(bus.writes_to(gpio::GPEDS1), [1 << 8]);
        assert_eq!(signal.reader().get(), 7);
    }

    #[test]
    fn rejects_duplicate_routes() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(0);
        let routes = [EdgeRoute::new(pin(4), 1), EdgeRoute::new(pin(4), 2)];
        let err = IrqContext::new(&bus, &routes, &signal).err();
        assert_eq!(err, Some(RouteError::DuplicatePin(4)));
        // The writer is still available.
        assert!(signal.claim_writer().is_some());
    }

    #[test]
    fn a_signal_feeds_one_context() {
        let bus = SimulatedBus::new();
        let signal = SharedSignal::new(0);
        let routes = routes();
        let _first = IrqContext::new(&bus, &routes, &signal).unwrap();
        let second = IrqContext::new(&bus, &routes, &signal).err();
        assert_eq!(second, Some(RouteError::WriterTaken));
    }
}
