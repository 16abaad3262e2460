//! A device abstraction that drives four HDMI switches through their IR receiver lines.
//!
//! See [`IrSwitch`] for usage examples.
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel as EmbassyChannel;
use embassy_time::{Delay, Instant};

use crate::request::{Dispatch, Request};
use crate::switch_bank::SwitchBank;
use crate::switch_config::{Emission, INPUT_COUNT, SELECTOR_COUNT, SwitchConfig};
use crate::{Error, Result};

// ===== Public API ===========================================================

/// Configuration type used by [`IrSwitch`].
pub type IrSwitchConfig = SwitchConfig<SELECTOR_COUNT, INPUT_COUNT>;

/// Static type for the `IrSwitch` device abstraction.
///
/// See [`IrSwitch`] for usage examples.
pub type IrSwitchStatic = EmbassyChannel<CriticalSectionRawMutex, Emission, 4>;

/// Drives the IR receiver line of each of four switches.
///
/// Requests are validated on the caller's side and queued; a background task owns the pins
/// and transmits one frame at a time.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use embassy_executor::Spawner;
/// # use hdmi_ir_switch::{IrSwitch, IrSwitchConfig, IrSwitchStatic};
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> hdmi_ir_switch::Result<()> {
/// static IR_SWITCH_STATIC: IrSwitchStatic = IrSwitch::new_static();
/// let ir_switch = IrSwitch::new(
///     [p.PIN_2.into(), p.PIN_3.into(), p.PIN_4.into(), p.PIN_5.into()],
///     IrSwitchConfig::default(),
///     &IR_SWITCH_STATIC,
///     spawner,
/// )?;
///
/// // Switch 1 to input 4.
/// ir_switch.select_input(1, 4).await?;
/// # Ok(())
/// # }
/// ```
pub struct IrSwitch<'a> {
    config: IrSwitchConfig,
    ir_switch_static: &'a IrSwitchStatic,
}

impl IrSwitch<'_> {
    /// Create static channel resources for queued emissions.
    ///
    /// See [`IrSwitch`] for usage examples.
    #[must_use]
    pub const fn new_static() -> IrSwitchStatic {
        EmbassyChannel::new()
    }

    /// Take the four receiver-line pins and start the transmitter task.
    ///
    /// Pins start HIGH, which the switches read as "no carrier".
    ///
    /// See [`IrSwitch`] for usage examples.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new(
        pins: [Peri<'static, AnyPin>; SELECTOR_COUNT],
        config: IrSwitchConfig,
        ir_switch_static: &'static IrSwitchStatic,
        spawner: Spawner,
    ) -> Result<Self> {
        let outputs = pins.map(|pin| Output::new(pin, Level::High));
        let bank = SwitchBank::new(outputs, Delay, config)?;
        let token = ir_switch_task(bank, ir_switch_static).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        Ok(Self {
            config,
            ir_switch_static,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &IrSwitchConfig {
        &self.config
    }

    /// Switch `selector` (1-based) to `input` (1-based).
    ///
    /// # Errors
    /// Returns an error if either number is out of range.
    pub async fn select_input(&self, selector: u8, input: u8) -> Result<()> {
        self.submit(Request::SelectInput { selector, input }).await
    }

    /// Send a raw command, using the configured address when `address` is `None`.
    ///
    /// # Errors
    /// Returns an error if `selector` is out of range.
    pub async fn send_command(&self, selector: u8, address: Option<u8>, command: u8) -> Result<()> {
        self.submit(Request::SendCommand {
            selector,
            address,
            command,
        })
        .await
    }

    /// Validate `request` and queue it for transmission.
    ///
    /// Returns once the frame is queued, not once it has been sent.
    ///
    /// # Errors
    /// Returns an error if the request does not fit the configuration.
    pub async fn submit(&self, request: Request) -> Result<()> {
        let emission = self.config.resolve(request).inspect_err(|err| {
            warn!(
                "IR switch: rejected {}: {}",
                defmt::Debug2Format(&request),
                defmt::Display2Format(err)
            );
        })?;
        self.ir_switch_static.send(emission).await;
        Ok(())
    }
}

impl Dispatch for &IrSwitch<'_> {
    async fn dispatch(&mut self, request: Request) -> Result<()> {
        self.submit(request).await
    }
}

type HardwareBank = SwitchBank<Output<'static>, Delay, SELECTOR_COUNT, INPUT_COUNT>;

#[embassy_executor::task]
async fn ir_switch_task(mut bank: HardwareBank, ir_switch_static: &'static IrSwitchStatic) -> ! {
    info!("IR switch task started");
    loop {
        let emission = ir_switch_static.receive().await;
        let start = Instant::now();
        // Keep interrupts out so no pulse gets stretched.
        let result = critical_section::with(|_| bank.emit(emission));
        match result {
            Ok(()) => info!(
                "IR switch: selector={} addr=0x{:02X} cmd=0x{:02X} sent in {}µs",
                emission.selector_index,
                emission.address,
                emission.command,
                start.elapsed().as_micros()
            ),
            Err(err) => warn!(
                "IR switch: selector={} send failed: {}",
                emission.selector_index,
                defmt::Display2Format(&err)
            ),
        }
    }
}
