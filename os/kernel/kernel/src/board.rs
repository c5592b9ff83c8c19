use crate::{BoardConfig, BringUpError};
use kernel_gpio::{GpioController, Pin, PinConfig, SpinDelay};
use kernel_info::display::FramebufferDescriptor;
use kernel_irq::EdgeRoute;
use kernel_mailbox::{MailboxChannel, negotiate_framebuffer};
use kernel_mmio::RegisterBus;

/// The configured board.
#[derive(Debug)]
pub struct Board<B, const LEDS: usize, const BUTTONS: usize> {
    gpio: GpioController<B, SpinDelay>,
    leds: [Pin; LEDS],
    routes: [EdgeRoute; BUTTONS],
    framebuffer: FramebufferDescriptor,
}

impl<B: RegisterBus, const LEDS: usize, const BUTTONS: usize> Board<B, LEDS, BUTTONS> {
    /// Configures the LEDs as outputs and the buttons as rising-edge
    /// inputs, then negotiates the framebuffer.
    ///
    /// IRQs stay masked; arming the handler is up to the caller.
    ///
    /// # Errors
    /// The first GPIO or negotiation failure. Pins configured before the
    /// failure keep their configuration.
    pub fn bring_up<C: MailboxChannel + ?Sized>(
        bus: B,
        channel: &mut C,
        config: &BoardConfig<LEDS, BUTTONS>,
    ) -> Result<Self, BringUpError> {
        let mut gpio = GpioController::new(bus, SpinDelay::pull_settle());

        for &led in &config.leds {
            gpio.configure(PinConfig::output(led))?;
        }
        for route in &config.buttons {
            gpio.configure(PinConfig::input(route.pin).with_rising_edge()?)?;
        }

        let framebuffer = negotiate_framebuffer(channel, &config.display)?;
        log::info!("board up: {LEDS} LEDs, {BUTTONS} buttons");

        Ok(Self {
            gpio,
            leds: config.leds,
            routes: config.buttons,
            framebuffer,
        })
    }

    #[must_use]
    pub const fn gpio(&self) -> &GpioController<B, SpinDelay> {
        &self.gpio
    }

    pub const fn gpio_mut(&mut self) -> &mut GpioController<B, SpinDelay> {
        &mut self.gpio
    }

    #[must_use]
    pub const fn leds(&self) -> &[Pin; LEDS] {
        &self.leds
    }

    #[must_use]
    pub const fn routes(&self) -> &[EdgeRoute; BUTTONS] {
        &self.routes
    }

    #[must_use]
    pub const fn framebuffer(&self) -> &FramebufferDescriptor {
        &self.framebuffer
    }
}
