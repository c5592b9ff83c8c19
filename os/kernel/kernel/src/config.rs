//! Compile-time board configuration.

use kernel_gpio::Pin;
use kernel_info::display::PixelOrder;
use kernel_irq::EdgeRoute;
use kernel_mailbox::FramebufferRequest;

/// Pin constant for configuration tables; rejects bad numbers at compile
/// time.
const fn pin(number: u8) -> Pin {
    match Pin::new(number) {
        Ok(pin) => pin,
        Err(_) => panic!("not a GPIO pin"),
    }
}

/// How long an LED stays lit, by chase direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlinkTiming {
    /// Half period while the signal reads +1.
    pub forward_us: u32,
    /// Half period for any other signal value.
    pub reverse_us: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BoardConfig<const LEDS: usize, const BUTTONS: usize> {
    /// LED outputs, in chase order.
    pub leds: [Pin; LEDS],
    /// Buttons and the value each publishes when pressed.
    pub buttons: [EdgeRoute; BUTTONS],
    /// Value of the shared signal before the first press.
    pub initial_signal: i32,
    pub display: FramebufferRequest,
    pub blink: BlinkTiming,
}

pub type DefaultConfig = BoardConfig<3, 2>;

impl DefaultConfig {
    pub const BUTTON_A: EdgeRoute = EdgeRoute::new(pin(23), -1);
    pub const BUTTON_B: EdgeRoute = EdgeRoute::new(pin(22), 1);

    pub const DEFAULT: Self = Self {
        leds: [pin(4), pin(17), pin(27)],
        buttons: [Self::BUTTON_A, Self::BUTTON_B],
        initial_signal: 1,
        display: FramebufferRequest::new(1024, 768, 32, PixelOrder::Bgr).with_alignment(4),
        blink: BlinkTiming {
            forward_us: 500_000,
            reverse_us: 250_000,
        },
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_layout() {
        let c = DefaultConfig::DEFAULT;
        assert_eq!(c.leds.map(Pin::number), [4, 17, 27]);
        assert_eq!(c.buttons[0].pin.number(), 23);
        assert_eq!(c.buttons[0].outcome, -1);
        assert_eq!(c.buttons[1].pin.number(), 22);
        assert_eq!(c.buttons[1].outcome, 1);
        assert_eq!((c.display.width, c.display.height, c.display.depth), (1024, 768, 32));
        assert_eq!(c.display.pixel_order, PixelOrder::Bgr);
    }
}
