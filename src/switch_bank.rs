//! A set of switches, one output pin each, sharing one busy-wait clock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::pulse::{self, SPACE};
use crate::request::{Dispatch, Request};
use crate::switch_config::{Emission, SwitchConfig};
use crate::{Error, Result};

/// Owns the pins for `N` switches and transmits on them synchronously.
///
/// Each `emit` blocks for a whole frame. The bank is the only owner of its pins, so two
/// frames can never interleave on the same wire.
pub struct SwitchBank<P, D, const N: usize, const INPUTS: usize> {
    pins: [P; N],
    delay: D,
    config: SwitchConfig<N, INPUTS>,
}

impl<P, D, const N: usize, const INPUTS: usize> SwitchBank<P, D, N, INPUTS>
where
    P: OutputPin,
    D: DelayNs,
    Error: From<P::Error>,
{
    /// Take ownership of the pins and park each one at rest (HIGH).
    ///
    /// # Errors
    /// Returns an error if a pin cannot be driven.
    pub fn new(mut pins: [P; N], delay: D, config: SwitchConfig<N, INPUTS>) -> Result<Self> {
        for pin in &mut pins {
            pin.set_state(SPACE)?;
        }
        Ok(Self {
            pins,
            delay,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SwitchConfig<N, INPUTS> {
        &self.config
    }

    /// Transmit a resolved emission on its pin.
    ///
    /// # Errors
    /// [`Error::SelectorOutOfRange`] if the index is past the pin table, or the pin's error.
    pub fn emit(&mut self, emission: Emission) -> Result<()> {
        let pin = self
            .pins
            .get_mut(emission.selector_index)
            .ok_or(Error::SelectorOutOfRange)?;
        pulse::emit(pin, &mut self.delay, emission.address, emission.command)?;
        Ok(())
    }

    /// Validate `request` against the configuration and transmit it.
    ///
    /// # Errors
    /// Any error from [`SwitchConfig::resolve`] or [`SwitchBank::emit`].
    pub fn execute(&mut self, request: Request) -> Result<()> {
        let emission = self.config.resolve(request)?;
        self.emit(emission)
    }

    /// Give the pins and clock back.
    #[must_use]
    pub fn release(self) -> ([P; N], D) {
        (self.pins, self.delay)
    }
}

impl<P, D, const N: usize, const INPUTS: usize> Dispatch for SwitchBank<P, D, N, INPUTS>
where
    P: OutputPin,
    D: DelayNs,
    Error: From<P::Error>,
{
    async fn dispatch(&mut self, request: Request) -> Result<()> {
        self.execute(request)
    }
}
