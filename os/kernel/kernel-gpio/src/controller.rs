use crate::{Direction, GpioError, Pin, PinConfig, SettleDelay};
use kernel_mmio::map::{gpio, irq};
use kernel_mmio::regs::IrqPending2;
use kernel_mmio::{RegisterBus, bit};

/// Owner of the GPIO block.
///
/// Remembers which pins it has configured so each pin is set up once.
#[derive(Debug)]
pub struct GpioController<B, D> {
    bus: B,
    settle: D,
    configured: u64,
}

impl<B: RegisterBus, D: SettleDelay> GpioController<B, D> {
    #[must_use]
    pub const fn new(bus: B, settle: D) -> Self {
        Self {
            bus,
            settle,
            configured: 0,
        }
    }

    /// Configures `pin` as an input or output and optionally enables its
    /// rising-edge interrupt. Pull resistors are disabled.
    ///
    /// # Errors
    /// Returns a [`GpioError`] without touching any register if the pin
    /// number is invalid, an edge is requested on an output, or the pin was
    /// configured before.
    pub fn configure_pin(
        &mut self,
        pin: u8,
        direction: Direction,
        enable_edge: bool,
    ) -> Result<PinConfig, GpioError> {
        let config = Pin::new(pin)
            .and_then(|pin| {
                let config = match direction {
                    Direction::Input => PinConfig::input(pin),
                    Direction::Output => PinConfig::output(pin),
                };
                if enable_edge {
                    config.with_rising_edge()
                } else {
                    Ok(config)
                }
            })
            .inspect_err(|e| log::error!("pin {pin} not configured: {e}"))?;

        self.configure(config)?;
        Ok(config)
    }

    /// Applies a pin configuration.
    ///
    /// # Errors
    /// [`GpioError::AlreadyConfigured`] if the pin was configured before.
    pub fn configure(&mut self, config: PinConfig) -> Result<(), GpioError> {
        let pin = config.pin();
        let slot = 1u64 << pin.number();
        if self.configured & slot != 0 {
            log::warn!("pin {} is already configured", pin.number());
            return Err(GpioError::AlreadyConfigured(pin.number()));
        }

        self.select_function(pin, config.direction());
        self.apply_pull(config);
        if config.rising_edge() {
            self.enable_rising_edge(pin);
        }

        self.configured |= slot;
        log::debug!(
            "pin {} configured as {:?} (pull {:?}, rising edge {})",
            pin.number(),
            config.direction(),
            config.pull(),
            config.rising_edge()
        );
        Ok(())
    }

    /// Drives an output pin high.
    #[inline]
    pub fn set_pin(&self, pin: Pin) {
        self.bus.write(pin.bank().output_set(), pin.mask());
    }

    /// Drives an output pin low.
    #[inline]
    pub fn clear_pin(&self, pin: Pin) {
        self.bus.write(pin.bank().output_clear(), pin.mask());
    }

    /// Samples the pin's current level.
    #[inline]
    #[must_use]
    pub fn read_pin(&self, pin: Pin) -> bool {
        self.bus.read(pin.bank().level()) & pin.mask() != 0
    }

    /// Whether `pin` has been configured through this controller.
    #[must_use]
    pub const fn is_configured(&self, pin: Pin) -> bool {
        self.configured & (1u64 << pin.number()) != 0
    }

    pub const fn bus(&self) -> &B {
        &self.bus
    }

    fn select_function(&self, pin: Pin, direction: Direction) {
        let shift = pin.field_shift();
        self.bus.modify(gpio::gpfsel(pin.selector()), |v| {
            (v & !(0b111 << shift)) | (direction.function_bits() << shift)
        });
    }

    /// Control signal, set-up time, clock, hold time, release.
    fn apply_pull(&self, config: PinConfig) {
        let clock = config.pin().bank().pull_clock();

        self.bus.write(gpio::GPPUD, config.pull() as u32);
        self.settle.settle();
        self.bus.write(clock, config.pin().mask());
        self.settle.settle();
        self.bus.write(gpio::GPPUD, 0);
        self.bus.write(clock, 0);
    }

    fn enable_rising_edge(&self, pin: Pin) {
        let mask = pin.mask();
        self.bus.modify(pin.bank().rising_edge_enable(), |v| v | mask);
        self.bus
            .write(irq::ENABLE_IRQS_2, bit(IrqPending2::GPIO_SUMMARY_BIT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pull, SpinDelay};
    use core::cell::Cell;
    use kernel_mmio::sim::SimulatedBus;

    fn controller(bus: &SimulatedBus) -> GpioController<&SimulatedBus, SpinDelay> {
        GpioController::new(bus, SpinDelay::new(0))
    }

    #[test]
    fn output_function_is_written_into_its_field() {
        let bus = SimulatedBus::new();
        let mut ctl = controller(&bus);
        ctl.configure_pin(17, Direction::Output, false).unwrap();
        assert_eq!(bus.peek(gpio::gpfsel(1)), 0b001 << 21);
    }

    #[test]
    fn input_clears_a_previous_output_encoding() {
        let bus = SimulatedBus::new();
        bus.poke(gpio::gpfsel(2), 0b111 << 9);
        let mut ctl = controller(&bus);
        ctl.configure_pin(23, Direction::Input, false).unwrap();
        assert_eq!(bus.peek(gpio::gpfsel(2)), 0);
    }

    #[test]
    fn pull_sequence_follows_the_peripheral_protocol() {
        struct Marker<'a>(&'a SimulatedBus, Cell<u32>);
        impl SettleDelay for Marker<'_> {
            fn settle(&self) {
                // Record the delay as a write to a scratch address.
                self.1.set(self.1.get() + 1);
                self.0.write(kernel_mmio::MmioAddress::new(0), self.1.get());
            }
        }

        let bus = SimulatedBus::new();
        let mut ctl = GpioController::new(&bus, Marker(&bus, Cell::new(0)));
        let config = PinConfig::input(Pin::new(9).unwrap()).with_pull(Pull::Down);
        ctl.configure(config).unwrap();

        let scratch = kernel_mmio::MmioAddress::new(0);
        let log: Vec<_> = bus
            .writes()
            .into_iter()
            .filter(|(a, _)| [gpio::GPPUD, gpio::GPPUDCLK0, scratch].contains(a))
            .collect();
        assert_eq!(
            log,
            [
                (gpio::GPPUD, Pull::Down as u32),
                (scratch, 1),
                (gpio::GPPUDCLK0, 1 << 9),
                (scratch, 2),
                (gpio::GPPUD, 0),
                (gpio::GPPUDCLK0, 0),
            ]
        );
    }

    #[test]
    fn bank_one_pins_use_bank_one_registers() {
        let bus = SimulatedBus::new();
        let mut ctl = controller(&bus);
        ctl.configure_pin(40, Direction::Input, true).unwrap();
        assert_eq!(bus.writes_to(gpio::GPPUDCLK1), [1 << 8, 0]);
        assert_eq!(bus.peek(gpio::GPREN1), 1 << 8);
        assert_eq!(bus.peek(gpio::GPREN0), 0);
    }

    #[test]
    fn edge_enable_preserves_other_pins() {
        let bus = SimulatedBus::new();
        bus.poke(gpio::GPREN0, 1 << 5);
        let mut ctl = controller(&bus);
        ctl.configure_pin(23, Direction::Input, true).unwrap();
        ctl.configure_pin(22, Direction::Input, true).unwrap();

        assert_eq!(bus.peek(gpio::GPREN0), (1 << 5) | (1 << 22) | (1 << 23));
        assert_eq!(bus.peek(irq::ENABLE_IRQS_2), 1 << 20);
    }

    #[test]
    fn no_edge_means_no_interrupt_enable() {
        let bus = SimulatedBus::new();
        let mut ctl = controller(&bus);
        ctl.configure_pin(10, Direction::Input, false).unwrap();
        assert_eq!(bus.peek(gpio::GPREN0), 0);
        assert!(bus.writes_to(irq::ENABLE_IRQS_2).is_empty());
    }

    #[test]
    fn invalid_requests_touch_no_register() {
        let bus = SimulatedBus::new();
        let mut ctl = controller(&bus);

        assert_eq!(
            ctl.configure_pin(54, Direction::Output, false),
            Err(GpioError::InvalidPin(54))
        );
        assert_eq!(
            ctl.configure_pin(61, Direction::Input, true),
            Err(GpioError::UnreachableBank {
                pin: 61,
                selector: 6
            })
        );
        assert_eq!(
            ctl.configure_pin(4, Direction::Output, true),
            Err(GpioError::EdgeOnOutput(4))
        );
        assert!(bus.writes().is_empty());
    }

    #[test]
    fn pins_are_configured_once() {
        let bus = SimulatedBus::new();
        let mut ctl = controller(&bus);
        ctl.configure_pin(9, Direction::Output, false).unwrap();
        bus.clear_log();

        assert_eq!(
            ctl.configure_pin(9, Direction::Input, false),
            Err(GpioError::AlreadyConfigured(9))
        );
        assert!(bus.writes().is_empty());
        assert!(ctl.is_configured(Pin::new(9).unwrap()));
    }

    #[test]
    fn set_and_clear_write_single_bits() {
        let bus = SimulatedBus::new();
        let ctl = controller(&bus);
        let pin = Pin::new(27).unwrap();

        ctl.set_pin(pin);
        ctl.clear_pin(pin);
        assert_eq!(bus.writes(), [(gpio::GPSET0, 1 << 27), (gpio::GPCLR0, 1 << 27)]);
    }
}
