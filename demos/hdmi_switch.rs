//! Four HDMI switches controlled over UART0.
//!
//! Wiring: each switch's IR receiver output line goes to GP2..GP5 (switch 1..4). UART0 TX/RX
//! are GP0/GP1 at 115200 baud.
//!
//! Send `selectInput 1,4` to put switch 1 on input 4, or `sendCommand 2,1,80` to send a raw
//! address/command. Every line is answered with `0` (ok) or `1` (rejected).
//!
//! Run with: `cargo xtask uf2 hdmi_switch`
#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embassy_time::Timer;
use hdmi_ir_switch::remote::serve;
use hdmi_ir_switch::{IrSwitch, IrSwitchConfig, IrSwitchStatic, Never, Result};
use panic_probe as _;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
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
    info!("IR switch ready on GP2..GP5");

    static TX_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();
    static RX_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();
    let mut uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        TX_BUFFER.init([0; 64]),
        RX_BUFFER.init([0; 64]),
        UartConfig::default(),
    );
    info!("Listening for requests on UART0");

    let mut dispatcher = &ir_switch;
    loop {
        if let Err(err) = serve(&mut uart, &mut dispatcher).await {
            warn!("UART error: {:?}", err);
            Timer::after_millis(100).await;
        }
    }
}
