//! Drive HDMI input-selector switches by bit-banging NEC frames onto their IR receiver lines.
//!
//! [`NecFrame`] packs an address and command, [`pulse`] turns the frame into timed pin levels,
//! and the request layer ([`request`], [`remote`]) turns `selectInput`/`sendCommand` calls into
//! frames for the right switch.
#![cfg_attr(not(test), no_std)]

mod error;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod ir_switch;
mod nec_frame;
mod never;
pub mod pulse;
pub mod remote;
#[cfg(all(feature = "net", any(feature = "pico1", feature = "pico2")))]
pub mod remote_tcp;
pub mod request;
pub mod switch_bank;
pub mod switch_config;

// Re-export commonly used items
pub use error::{Error, Result};
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use ir_switch::{IrSwitch, IrSwitchConfig, IrSwitchStatic};
pub use nec_frame::NecFrame;
pub use never::Never;
pub use pulse::emit;
#[cfg(all(feature = "net", any(feature = "pico1", feature = "pico2")))]
pub use remote_tcp::RemoteTcp;
pub use request::{Dispatch, Request};
pub use switch_bank::SwitchBank;
pub use switch_config::{Emission, SwitchConfig};
