//! Host-level tests: requests in, frames out on the right pin.
#![cfg(feature = "host")]

mod support;

use embassy_futures::block_on;
use embedded_hal::digital::PinState;
use hdmi_ir_switch::request::status_code;
use hdmi_ir_switch::switch_config::{INPUT_COUNT, SELECTOR_COUNT};
use hdmi_ir_switch::{Dispatch, Error, NecFrame, Request, SwitchBank, SwitchConfig};
use support::{Event, Log, RecordingPin, VirtualDelay, expected_intervals, intervals, new_log};

type TestBank = SwitchBank<RecordingPin, VirtualDelay, SELECTOR_COUNT, INPUT_COUNT>;

fn bank(log: &Log) -> TestBank {
    let pins = [0, 1, 2, 3].map(|id| RecordingPin::new(id, log));
    let bank = SwitchBank::new(pins, VirtualDelay::new(log), SwitchConfig::default()).unwrap();
    log.borrow_mut().clear();
    bank
}

fn call(bank: &mut TestBank, operation: &str, arguments: &str) -> i32 {
    let result = Request::parse(operation, arguments)
        .and_then(|request| block_on(bank.dispatch(request)));
    status_code(&result)
}

fn pins_touched(events: &[Event]) -> Vec<usize> {
    let mut pins: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            Event::Level { pin, .. } => Some(*pin),
            Event::Wait { .. } => None,
        })
        .collect();
    pins.dedup();
    pins
}

#[test]
fn new_parks_every_pin_high() {
    let log = new_log();
    let pins = [0, 1, 2, 3].map(|id| RecordingPin::new(id, &log));
    let _bank: TestBank =
        SwitchBank::new(pins, VirtualDelay::new(&log), SwitchConfig::default()).unwrap();
    let expected: Vec<Event> = (0..4)
        .map(|pin| Event::Level {
            pin,
            level: PinState::High,
        })
        .collect();
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn select_input_1_4_sends_0x50_on_first_pin() {
    let log = new_log();
    let mut bank = bank(&log);

    assert_eq!(call(&mut bank, "selectInput", "1,4"), 0);

    let events = log.take();
    assert_eq!(pins_touched(&events), vec![0]);
    let (schedule, rest) = intervals(&events);
    assert_eq!(
        schedule,
        expected_intervals(NecFrame::new(0x01, 0x50).as_u32())
    );
    assert_eq!(rest, Some(PinState::High));
}

#[test]
fn selector_out_of_range_is_rejected_without_output() {
    let log = new_log();
    let mut bank = bank(&log);

    assert_eq!(call(&mut bank, "selectInput", "5,1"), 1);
    assert_eq!(call(&mut bank, "selectInput", "0,1"), 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn input_out_of_range_is_rejected_without_output() {
    let log = new_log();
    let mut bank = bank(&log);

    assert_eq!(call(&mut bank, "selectInput", "1,6"), 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn send_command_targets_selected_pin() {
    let log = new_log();
    let mut bank = bank(&log);

    assert_eq!(call(&mut bank, "sendCommand", "4,2,96"), 0);

    let events = log.take();
    assert_eq!(pins_touched(&events), vec![3]);
    let (schedule, _) = intervals(&events);
    assert_eq!(schedule, expected_intervals(NecFrame::new(0x02, 0x60).as_u32()));
}

#[test]
fn send_command_without_address_uses_configured_one() {
    let log = new_log();
    let pins = [RecordingPin::new(0, &log)];
    let config: SwitchConfig<1, 1> = SwitchConfig::new(0x7E, [0x00]);
    let mut bank = SwitchBank::new(pins, VirtualDelay::new(&log), config).unwrap();
    log.borrow_mut().clear();

    bank.execute(Request::SendCommand {
        selector: 1,
        address: None,
        command: 0x11,
    })
    .unwrap();

    let (schedule, _) = intervals(&log.take());
    assert_eq!(schedule, expected_intervals(NecFrame::new(0x7E, 0x11).as_u32()));
}

#[test]
fn emit_rejects_index_past_pin_table() {
    let log = new_log();
    let mut bank = bank(&log);
    let result = bank.emit(hdmi_ir_switch::Emission {
        selector_index: 4,
        address: 0x01,
        command: 0x40,
    });
    assert!(matches!(result, Err(Error::SelectorOutOfRange)));
    assert!(log.borrow().is_empty());
}
