//! Per-deployment mapping from selector and input numbers to what gets transmitted.

use crate::request::Request;
use crate::{Error, Result};

/// Number of switches wired to the reference board.
pub const SELECTOR_COUNT: usize = 4;
/// Number of inputs on each switch.
pub const INPUT_COUNT: usize = 5;

/// The address the stock remote uses.
pub const DEFAULT_ADDRESS: u8 = 0x01;

/// Command bytes that select inputs 1 through 5 on the reference switches.
///
/// Found by sweeping `sendCommand`; they carry no meaning beyond this hardware.
pub const DEFAULT_INPUT_COMMANDS: [u8; INPUT_COUNT] = [0x40, 0x60, 0x10, 0x50, 0xB0];

/// Which address to send and which command selects each input.
///
/// `SELECTORS` is the number of switches (one output pin each). Selectors and inputs are
/// 1-based, as the remote caller sees them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchConfig<const SELECTORS: usize, const INPUTS: usize> {
    pub address: u8,
    pub input_commands: [u8; INPUTS],
}

/// A validated transmission: which pin, and what to put on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Emission {
    /// 0-based index into the pin table.
    pub selector_index: usize,
    pub address: u8,
    pub command: u8,
}

impl<const SELECTORS: usize, const INPUTS: usize> SwitchConfig<SELECTORS, INPUTS> {
    #[must_use]
    pub const fn new(address: u8, input_commands: [u8; INPUTS]) -> Self {
        Self {
            address,
            input_commands,
        }
    }

    /// Check a request against this configuration and work out what to send.
    ///
    /// # Errors
    /// [`Error::SelectorOutOfRange`] unless `1 <= selector <= SELECTORS`;
    /// [`Error::InputOutOfRange`] unless `1 <= input <= INPUTS`.
    pub fn resolve(&self, request: Request) -> Result<Emission> {
        match request {
            Request::SelectInput { selector, input } => Ok(Emission {
                selector_index: Self::selector_index(selector)?,
                address: self.address,
                command: self.input_command(input)?,
            }),
            Request::SendCommand {
                selector,
                address,
                command,
            } => Ok(Emission {
                selector_index: Self::selector_index(selector)?,
                address: address.unwrap_or(self.address),
                command,
            }),
        }
    }

    /// Command byte for a 1-based input number.
    ///
    /// # Errors
    /// [`Error::InputOutOfRange`] if `input` is 0 or past the table.
    pub fn input_command(&self, input: u8) -> Result<u8> {
        usize::from(input)
            .checked_sub(1)
            .and_then(|index| self.input_commands.get(index))
            .copied()
            .ok_or(Error::InputOutOfRange)
    }

    fn selector_index(selector: u8) -> Result<usize> {
        usize::from(selector)
            .checked_sub(1)
            .filter(|index| *index < SELECTORS)
            .ok_or(Error::SelectorOutOfRange)
    }
}

impl Default for SwitchConfig<SELECTOR_COUNT, INPUT_COUNT> {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, DEFAULT_INPUT_COMMANDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: SwitchConfig<SELECTOR_COUNT, INPUT_COUNT> =
        SwitchConfig::new(DEFAULT_ADDRESS, DEFAULT_INPUT_COMMANDS);

    #[test]
    fn select_input_uses_table_and_address() {
        let emission = CONFIG
            .resolve(Request::SelectInput {
                selector: 1,
                input: 4,
            })
            .unwrap();
        assert_eq!(
            emission,
            Emission {
                selector_index: 0,
                address: 0x01,
                command: 0x50
            }
        );
    }

    #[test]
    fn selector_bounds() {
        for selector in [0, 5, u8::MAX] {
            let result = CONFIG.resolve(Request::SelectInput { selector, input: 1 });
            assert!(matches!(result, Err(Error::SelectorOutOfRange)), "{selector}");
        }
        let last = CONFIG.resolve(Request::SelectInput {
            selector: 4,
            input: 1,
        });
        assert_eq!(last.unwrap().selector_index, 3);
    }

    #[test]
    fn input_bounds() {
        for input in [0, 6] {
            let result = CONFIG.resolve(Request::SelectInput { selector: 1, input });
            assert!(matches!(result, Err(Error::InputOutOfRange)), "{input}");
        }
        assert_eq!(CONFIG.input_command(5).unwrap(), 0xB0);
    }

    #[test]
    fn send_command_falls_back_to_configured_address() {
        let config: SwitchConfig<2, 1> = SwitchConfig::new(0x20, [0x00]);
        let defaulted = config
            .resolve(Request::SendCommand {
                selector: 2,
                address: None,
                command: 0x77,
            })
            .unwrap();
        assert_eq!(defaulted.address, 0x20);
        assert_eq!(defaulted.selector_index, 1);

        let explicit = config
            .resolve(Request::SendCommand {
                selector: 1,
                address: Some(0x09),
                command: 0x77,
            })
            .unwrap();
        assert_eq!(explicit.address, 0x09);
    }

    #[test]
    fn default_matches_reference_hardware() {
        assert_eq!(SwitchConfig::default(), CONFIG);
    }
}
