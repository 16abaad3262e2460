//! Recording fakes for the embedded-hal pin and delay traits.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, PinState};

/// One observed call, tagged with the pin it happened on (delays carry no pin).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Level { pin: usize, level: PinState },
    Wait { us: u32 },
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct RecordingPin {
    id: usize,
    log: Log,
}

impl RecordingPin {
    pub fn new(id: usize, log: &Log) -> Self {
        Self {
            id,
            log: Rc::clone(log),
        }
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::High)
    }

    fn set_state(&mut self, level: PinState) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Level {
            pin: self.id,
            level,
        });
        Ok(())
    }
}

/// Advances a virtual clock instead of sleeping.
pub struct VirtualDelay {
    log: Log,
}

impl VirtualDelay {
    pub fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }
}

impl DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Wait { us: ns / 1_000 });
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::Wait { us });
    }
}

/// A (level, duration) interval as seen on one pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub level: PinState,
    pub us: u32,
}

/// Turn a log into the intervals it drove, plus the level the pin was left at.
///
/// Levels set without a following wait (initial parking, the final return to rest) are not
/// intervals; the last such level is returned as the resting level.
pub fn intervals(events: &[Event]) -> (Vec<Interval>, Option<PinState>) {
    let mut intervals = Vec::new();
    let mut pending: Option<PinState> = None;
    for event in events {
        match *event {
            Event::Level { level, .. } => pending = Some(level),
            Event::Wait { us } => {
                let level = pending.take().expect("wait without a level");
                intervals.push(Interval { level, us });
            }
        }
    }
    (intervals, pending)
}

/// Expected schedule for a frame word, built straight from the protocol description.
pub fn expected_intervals(word: u32) -> Vec<Interval> {
    let mark = |us| Interval {
        level: PinState::Low,
        us,
    };
    let space = |us| Interval {
        level: PinState::High,
        us,
    };
    let mut expected = vec![mark(9024), space(4512)];
    for shift in (0..32).rev() {
        expected.push(mark(564));
        expected.push(space(if (word >> shift) & 1 == 1 { 1692 } else { 564 }));
    }
    expected.push(mark(564));
    expected
}
