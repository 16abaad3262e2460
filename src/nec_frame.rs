//! The 32-bit NEC data word: address, inverted address, command, inverted command.

/// One NEC frame, most significant byte first: `address`, `!address`, `command`, `!command`.
///
/// The two guard bytes are derived, never supplied, so every `NecFrame` passes a receiver's
/// complement check.
///
/// ```
/// use hdmi_ir_switch::NecFrame;
///
/// let frame = NecFrame::new(0x01, 0x40);
/// assert_eq!(frame.as_u32(), 0x01FE_40BF);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NecFrame(u32);

impl NecFrame {
    /// Number of data bits carried by a frame.
    pub const BIT_COUNT: usize = u32::BITS as usize;

    /// Pack an address and command together with their complements.
    #[must_use]
    pub const fn new(address: u8, command: u8) -> Self {
        Self(u32::from_be_bytes([address, !address, command, !command]))
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn address(self) -> u8 {
        let [address, _, _, _] = self.0.to_be_bytes();
        address
    }

    #[must_use]
    pub const fn command(self) -> u8 {
        let [_, _, command, _] = self.0.to_be_bytes();
        command
    }

    /// The 32 data bits in transmission order (bit 31 first).
    pub fn bits(self) -> impl Iterator<Item = bool> {
        let word = self.0;
        (0..u32::BITS)
            .rev()
            .map(move |shift| word.checked_shr(shift).is_some_and(|rest| rest & 1 == 1))
    }
}

impl From<NecFrame> for u32 {
    fn from(frame: NecFrame) -> Self {
        frame.as_u32()
    }
}
