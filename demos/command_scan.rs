//! Sweep every command byte on switch 1 to find undocumented codes.
//!
//! Watch the switch while this runs and note which command moved it. Each command is sent
//! with the default address, followed by a pause long enough to see the result.
//!
//! Run with: `cargo xtask uf2 command_scan`
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use hdmi_ir_switch::{IrSwitch, IrSwitchConfig, IrSwitchStatic, Never, Result};
use panic_probe as _;

const SELECTOR: u8 = 1;
const PAUSE: Duration = Duration::from_secs(2);

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Never> {
    let p = embassy_rp::init(Default::default());

    static IR_SWITCH_STATIC: IrSwitchStatic = IrSwitch::new_static();
    let ir_switch = IrSwitch::new(
        [p.PIN_2.into(), p.PIN_3.into(), p.PIN_4.into(), p.PIN_5.into()],
        IrSwitchConfig::default(),
        &IR_SWITCH_STATIC,
        spawner,
    )?;

    info!(
        "Scanning commands on switch {} (address 0x{:02X})",
        SELECTOR,
        ir_switch.config().address
    );

    loop {
        for command in 0..=u8::MAX {
            info!("cmd=0x{:02X}", command);
            ir_switch.send_command(SELECTOR, None, command).await?;
            Timer::after(PAUSE).await;
        }
        info!("Scan complete, starting over");
    }
}
