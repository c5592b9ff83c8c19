//! # Bare-Metal Runtime
//!
//! Process-wide state and the two entry points the assembly stubs call:
//! [`boot`] from the reset path once a stack exists, and [`irq_handler`]
//! from the IRQ vector.
//!
//! ```text
//! boot ──▶ TraceLogger::register ──▶ Board::bring_up ──▶ arm ──▶ chase loop
//!                                                        │
//!                           irq_handler ◀── IRQ ─────────┘ (CONTEXT installed)
//! ```

use crate::config::DefaultConfig;
use crate::{Board, BringUpError, LedChaser};
use kernel_fb::{Color, PixelSurface};
use kernel_gpio::SystemTimer;
use kernel_irq::{EdgeRoute, IrqContext};
use kernel_mailbox::Mailbox;
use kernel_mmio::VolatileBus;
use kernel_sync::irq::{self, IrqGuard};
use kernel_sync::{HandlerCell, SharedSignal, SignalReader, SyncOnceCell};
use kernel_trace::{TraceLogger, UartSink};
use log::LevelFilter;

static CONFIG: DefaultConfig = DefaultConfig::DEFAULT;
static SIGNAL: SharedSignal = SharedSignal::new(DefaultConfig::DEFAULT.initial_signal);
static CONTEXT: HandlerCell<IrqContext<'static, VolatileBus>> = HandlerCell::new();
static LOGGER: SyncOnceCell<TraceLogger<UartSink<VolatileBus>>> = SyncOnceCell::new();

/// The hardware bus.
fn bus() -> VolatileBus {
    // SAFETY: this module is only built for the bare-metal target, where
    // the peripheral window is identity-mapped.
    unsafe { VolatileBus::new() }
}

/// Installs the dispatch context for `routes` and unmasks IRQs.
///
/// IRQs stay masked until the context is in place, so no edge is taken
/// against a half-installed handler.
///
/// # Errors
/// [`BringUpError::Route`] for bad routes or if the signal's writer was
/// claimed before, [`BringUpError::AlreadyArmed`] on a second call.
pub fn arm(routes: &'static [EdgeRoute]) -> Result<SignalReader<'static>, BringUpError> {
    {
        let _masked = IrqGuard::new();
        let ctx = IrqContext::new(bus(), routes, &SIGNAL)?;
        CONTEXT
            .install(ctx)
            .map_err(|_| BringUpError::AlreadyArmed)?;
    }
    irq::enable_irq();
    Ok(SIGNAL.reader())
}

/// Called by the IRQ vector stub.
///
/// An interrupt taken before [`arm`] has installed the context is ignored.
#[unsafe(no_mangle)]
pub extern "C" fn irq_handler() {
    CONTEXT.with(|ctx| {
        ctx.dispatch();
    });
}

/// Brings the board up and runs the LED chaser forever.
///
/// # Errors
/// Returns only if bring-up fails.
pub fn boot() -> Result<core::convert::Infallible, BringUpError> {
    let logger = LOGGER
        .get_or_init_irq_safe(|| TraceLogger::new(UartSink::new(bus()), LevelFilter::Info));
    // Fails only if a logger is registered already.
    let _ = logger.register();
    log::info!("booting");

    let mut mailbox = Mailbox::new(bus());
    let board = Board::bring_up(bus(), &mut mailbox, &CONFIG)?;

    // SAFETY: the descriptor was just negotiated and nothing else maps it.
    let mut surface = unsafe { PixelSurface::from_descriptor(board.framebuffer())? };
    surface.clear_screen();
    surface.set_pixel(surface.width() / 2, surface.height() / 2, Color::BLACK)?;

    let signal = arm(&CONFIG.buttons)?;
    let timer = SystemTimer::new(bus());
    let mut chaser = LedChaser::new(CONFIG.leds, CONFIG.blink);

    loop {
        chaser.blink(board.gpio(), &timer, signal);
    }
}
