//! Line protocol for remote callers.
//!
//! Each request is one line, `<operation> <arguments>`, for example `selectInput 1,4`. The
//! reply is the status code on its own line: `0` on success, `1` for anything else. The
//! protocol runs over any byte stream, so the same loop serves a UART or a TCP socket.

use embedded_io_async::{Read, Write};
use heapless::Vec;

use crate::request::{Dispatch, Request, STATUS_OK, status_code};
use crate::{Error, Result};

/// Longest request line accepted, excluding the terminator.
pub const MAX_LINE_LEN: usize = 64;

const READ_CHUNK_LEN: usize = 32;

/// Serve requests from `io` until the stream ends.
///
/// Blank lines are ignored and both `\r` and `\n` end a line. A line longer than
/// [`MAX_LINE_LEN`] is discarded and answered with `1`.
///
/// # Errors
/// Returns the stream's error if a read or write fails.
pub async fn serve<T, D>(io: &mut T, dispatcher: &mut D) -> Result<(), T::Error>
where
    T: Read + Write,
    D: Dispatch,
{
    let mut line: Vec<u8, MAX_LINE_LEN> = Vec::new();
    let mut overflowed = false;
    let mut chunk = [0u8; READ_CHUNK_LEN];

    loop {
        let len = io.read(&mut chunk).await?;
        if len == 0 {
            return Ok(());
        }
        for &byte in chunk.iter().take(len) {
            if byte != b'\r' && byte != b'\n' {
                if line.push(byte).is_err() {
                    overflowed = true;
                }
                continue;
            }
            if overflowed {
                reply(io, &Err(Error::RequestTooLong)).await?;
            } else if !line.is_empty() {
                let result = handle_line(&line, dispatcher).await;
                reply(io, &result).await?;
            }
            line.clear();
            overflowed = false;
        }
    }
}

/// Parse one request line and dispatch it.
///
/// # Errors
/// [`Error::MalformedRequest`] for non-UTF-8 input, otherwise whatever parsing or the
/// dispatcher reports.
pub async fn handle_line<D: Dispatch>(line: &[u8], dispatcher: &mut D) -> Result<()> {
    let text = core::str::from_utf8(line).map_err(|_| Error::MalformedRequest)?;
    let request = Request::parse_line(text)?;
    dispatcher.dispatch(request).await
}

async fn reply<T: Write>(io: &mut T, result: &Result<()>) -> Result<(), T::Error> {
    let response: &[u8] = if status_code(result) == STATUS_OK {
        b"0\n"
    } else {
        b"1\n"
    };
    io.write_all(response).await?;
    io.flush().await
}
