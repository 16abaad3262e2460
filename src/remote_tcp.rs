//! Serves the remote line protocol on a TCP port.
//!
//! Bringing the network up is the application's job; this only needs its `Stack`.
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::{Duration, Timer};

use crate::ir_switch::IrSwitch;
use crate::remote::serve;
use crate::{Error, Result};

/// Idle connections are dropped after this long.
const SOCKET_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle to the running TCP listener.
pub struct RemoteTcp {
    port: u16,
}

impl RemoteTcp {
    /// Start accepting connections on `port`, one client at a time.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new(
        stack: &'static Stack<'static>,
        ir_switch: &'static IrSwitch<'static>,
        port: u16,
        spawner: Spawner,
    ) -> Result<Self> {
        let token = remote_tcp_task(stack, ir_switch, port).map_err(Error::TaskSpawn)?;
        spawner.spawn(token);
        Ok(Self { port })
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

#[embassy_executor::task]
async fn remote_tcp_task(
    stack: &'static Stack<'static>,
    ir_switch: &'static IrSwitch<'static>,
    port: u16,
) -> ! {
    info!("Remote TCP server starting on port {}", port);

    let mut rx_buffer = [0u8; 512];
    let mut tx_buffer = [0u8; 256];

    loop {
        let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        if let Err(err) = socket.accept(port).await {
            warn!("Accept error: {:?}", err);
            Timer::after_millis(500).await;
            continue;
        }

        info!("Remote client connected: {:?}", socket.remote_endpoint());

        let mut dispatcher = ir_switch;
        match serve(&mut socket, &mut dispatcher).await {
            Ok(()) => info!("Remote client closed the connection"),
            Err(err) => warn!("Remote connection error: {:?}", err),
        }

        let _ = socket.flush().await;
        socket.close();
        Timer::after_millis(100).await;
    }
}
