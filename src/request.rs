//! Typed requests for the two remotely callable operations.
//!
//! The remote side calls an operation by name with a comma-separated argument string:
//!
//! - `selectInput("<selector>,<input>")`
//! - `sendCommand("<selector>,<command>")` or `sendCommand("<selector>,<address>,<command>")`
//!
//! Parsing stops here. Everything below this module only ever sees numbers.

use core::future::Future;

use heapless::Vec;

use crate::{Error, Result};

pub const SELECT_INPUT: &str = "selectInput";
pub const SEND_COMMAND: &str = "sendCommand";

/// Status returned to the remote caller on success.
pub const STATUS_OK: i32 = 0;
/// Status returned to the remote caller for any failure.
pub const STATUS_FAILED: i32 = 1;

const MAX_ARGUMENTS: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Switch `selector` to `input`, both 1-based.
    SelectInput { selector: u8, input: u8 },
    /// Send a raw command; `address: None` means the configured address.
    SendCommand {
        selector: u8,
        address: Option<u8>,
        command: u8,
    },
}

impl Request {
    /// Build a request from an operation name and its argument string.
    ///
    /// Selector and input must fit a byte. Address and command are arbitrary integers
    /// truncated to their low byte, so `sendCommand("1,-1")` sends `0xFF`.
    ///
    /// # Errors
    /// [`Error::UnknownOperation`] for any other operation name, [`Error::MalformedRequest`]
    /// for a wrong argument count or a non-integer argument, and
    /// [`Error::SelectorOutOfRange`]/[`Error::InputOutOfRange`] when an index does not fit.
    pub fn parse(operation: &str, arguments: &str) -> Result<Self> {
        let arguments = split_arguments(arguments)?;
        match (operation, arguments.as_slice()) {
            (SELECT_INPUT, [selector, input]) => Ok(Self::SelectInput {
                selector: parse_index(selector, Error::SelectorOutOfRange)?,
                input: parse_index(input, Error::InputOutOfRange)?,
            }),
            (SEND_COMMAND, [selector, command]) => Ok(Self::SendCommand {
                selector: parse_index(selector, Error::SelectorOutOfRange)?,
                address: None,
                command: parse_byte(command)?,
            }),
            (SEND_COMMAND, [selector, address, command]) => Ok(Self::SendCommand {
                selector: parse_index(selector, Error::SelectorOutOfRange)?,
                address: Some(parse_byte(address)?),
                command: parse_byte(command)?,
            }),
            (SELECT_INPUT | SEND_COMMAND, _) => Err(Error::MalformedRequest),
            _ => Err(Error::UnknownOperation),
        }
    }

    /// Parse `"<operation> <arguments>"`, as sent over the line protocol.
    ///
    /// # Errors
    /// See [`Request::parse`].
    pub fn parse_line(line: &str) -> Result<Self> {
        let line = line.trim();
        let (operation, arguments) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        Self::parse(operation, arguments)
    }
}

/// Something that can carry out a [`Request`].
pub trait Dispatch {
    /// Validate and perform `request`.
    ///
    /// # Errors
    /// Any validation or output error; the caller reduces it to [`STATUS_FAILED`].
    fn dispatch(&mut self, request: Request) -> impl Future<Output = Result<()>>;
}

/// The integer the remote caller gets back.
#[must_use]
pub const fn status_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(_) => STATUS_FAILED,
    }
}

fn split_arguments(arguments: &str) -> Result<Vec<&str, MAX_ARGUMENTS>> {
    let mut parts = Vec::new();
    for part in arguments.split(',') {
        parts.push(part.trim()).map_err(|_| Error::MalformedRequest)?;
    }
    Ok(parts)
}

fn parse_integer(text: &str) -> Result<i64> {
    text.parse::<i64>().map_err(|_| Error::MalformedRequest)
}

fn parse_index(text: &str, out_of_range: Error) -> Result<u8> {
    let value = parse_integer(text)?;
    u8::try_from(value).map_err(|_| out_of_range)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Truncating to the low byte is the documented behavior"
)]
fn parse_byte(text: &str) -> Result<u8> {
    Ok(parse_integer(text)? as u8)
}
