//! Bit-banged NEC transmitter for an active-low IR receiver line.
//!
//! The switch's own IR receiver output is wired to one of our GPIO pins. Pulling that line
//! LOW is what the switch sees as "carrier present", so every mark is driven LOW and every
//! space (and the idle line) is HIGH. This is the reverse of most NEC diagrams, which assume
//! mark = HIGH.
//!
//! Timing is done with busy-wait delays through [`DelayNs`], so callers choose the clock: an
//! `embassy_time::Delay` on the device, a recording fake in tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::NecFrame;

/// NEC base unit in microseconds.
///
/// Real remotes measure closer to 590µs, but NEC receivers accept roughly ±30%, so the
/// published nominal value is kept.
pub const UNIT_US: u32 = 564;

pub const LEAD_IN_MARK_US: u32 = 16 * UNIT_US;
pub const LEAD_IN_SPACE_US: u32 = 8 * UNIT_US;
pub const BIT_MARK_US: u32 = UNIT_US;
pub const ZERO_SPACE_US: u32 = UNIT_US;
pub const ONE_SPACE_US: u32 = 3 * UNIT_US;
pub const STOP_MARK_US: u32 = UNIT_US;

/// Pin level while the receiver line reports "carrier present".
pub const MARK: PinState = PinState::Low;
/// Pin level between marks and while idle.
pub const SPACE: PinState = PinState::High;

/// Intervals in one frame: lead-in mark and space, 32 mark/space pairs, stop mark.
pub const PULSE_COUNT: usize = 2 + 2 * NecFrame::BIT_COUNT + 1;

/// One timed interval of the schedule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pulse {
    pub level: PinState,
    pub duration_us: u32,
}

impl Pulse {
    #[must_use]
    pub const fn mark(duration_us: u32) -> Self {
        Self {
            level: MARK,
            duration_us,
        }
    }

    #[must_use]
    pub const fn space(duration_us: u32) -> Self {
        Self {
            level: SPACE,
            duration_us,
        }
    }
}

/// The pulse schedule for `frame`, in transmission order.
///
/// Always yields [`PULSE_COUNT`] pulses. The pin's final return to [`SPACE`] after the stop
/// mark is not part of the schedule; [`transmit`] does it.
pub fn pulses(frame: NecFrame) -> impl Iterator<Item = Pulse> {
    let lead_in = [Pulse::mark(LEAD_IN_MARK_US), Pulse::space(LEAD_IN_SPACE_US)];
    let data = frame.bits().flat_map(|bit| {
        let space_us = if bit { ONE_SPACE_US } else { ZERO_SPACE_US };
        [Pulse::mark(BIT_MARK_US), Pulse::space(space_us)]
    });
    lead_in
        .into_iter()
        .chain(data)
        .chain(core::iter::once(Pulse::mark(STOP_MARK_US)))
}

/// Send `address`/`command` as one NEC frame on `pin`.
///
/// Blocks for the whole frame (about 67.5 ms at most). There is no acknowledgement; `Ok`
/// only means every level was written.
///
/// # Errors
/// Returns the pin driver's error if a level cannot be set. On RP2040 this is `Infallible`.
pub fn emit<P, D>(pin: &mut P, delay: &mut D, address: u8, command: u8) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    transmit(pin, delay, NecFrame::new(address, command))
}

/// Send an already packed frame on `pin`, leaving it at rest afterwards.
///
/// # Errors
/// Returns the pin driver's error if a level cannot be set.
pub fn transmit<P, D>(pin: &mut P, delay: &mut D, frame: NecFrame) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    for pulse in pulses(frame) {
        pin.set_state(pulse.level)?;
        delay.delay_us(pulse.duration_us);
    }
    pin.set_state(SPACE)
}
