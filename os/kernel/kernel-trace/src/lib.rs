//! # Serial Trace Output
//!
//! A `log` backend for a machine with nothing but a UART.
//!
//! ```text
//! log::info!(..)
//!     ↓
//! TraceLogger   formats "[LEVEL] target: message\n", no allocation
//!     ↓
//! SinkWriter    core::fmt::Write over a ByteSink
//!     ↓
//! UartSink      waits for TX FIFO room, writes the PL011 data register
//! ```
//!
//! ## Feature System
//!
//! With the default `enabled` feature off, [`UartSink`] drops every byte
//! and touches no register, so release images can keep their log calls.
//!
//! ```rust,no_run
//! use kernel_mmio::VolatileBus;
//! use kernel_sync::SyncOnceCell;
//! use kernel_trace::{TraceLogger, UartSink};
//! use log::LevelFilter;
//!
//! static LOGGER: SyncOnceCell<TraceLogger<UartSink<VolatileBus>>> = SyncOnceCell::new();
//!
//! // SAFETY: running on the board with the peripherals identity-mapped.
//! let uart = UartSink::new(unsafe { VolatileBus::new() });
//! TraceLogger::new(uart, LevelFilter::Info).install(&LOGGER)?;
//! log::info!("up");
//! # Ok::<(), log::SetLoggerError>(())
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

mod logger;
mod sink;

pub use logger::TraceLogger;
pub use sink::{ByteSink, SinkWriter, UartSink};
