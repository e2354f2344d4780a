pub mod key_range {
    //! Partition of the 16-bit key action code space.
    //!
    //! The ranges never overlap; every code falls in at most one of them.
    //! Codes outside every range are reserved and render as raw numbers.

    pub const BASIC_MIN: u16 = 0x0000;
    pub const BASIC_NO: u16 = 0x0000;
    pub const BASIC_TRNS: u16 = 0x0001;
    pub const BASIC_A: u16 = 0x0004;
    pub const BASIC_1: u16 = 0x001e;
    pub const BASIC_0: u16 = 0x0027;
    pub const BASIC_MAX: u16 = 0x00ff;

    pub const MODIFIER_MIN: u16 = 0x00e0;
    pub const MODIFIER_MAX: u16 = 0x00e7;

    // Masked composites: a selector in the upper bits applied to an inner
    // key in the lower bits.
    pub const MOD_MIN: u16 = 0x0100;
    pub const MOD_MAX: u16 = 0x1fff;
    pub const MOD_TAP_MIN: u16 = 0x2000;
    pub const MOD_TAP_MAX: u16 = 0x3fff;
    pub const LAYER_TAP_MIN: u16 = 0x4000;
    pub const LAYER_TAP_MAX: u16 = 0x4fff;

    pub const TAP_DANCE_MIN: u16 = 0x5700;
    pub const TAP_DANCE_MAX: u16 = 0x57ff;

    pub const MACRO_MIN: u16 = 0x7700;
    pub const MACRO_MAX: u16 = 0x77ff;

    /// Highest modifier bitmask a MOD/MT selector can carry (5 bits).
    pub const MAX_MOD_BITS: u16 = 0x1f;

    pub fn base_code(code: u16) -> u16 {
        code & 0xff00
    }
}

pub mod macro_tag {
    //! Tag bytes of the serialized macro stream.
    //!
    //! All tags sit below [`TEXT_MIN`] so plain ASCII text needs no
    //! escaping; a zero byte ends the slot.

    pub const TERMINATOR: u8 = 0;
    pub const TAP: u8 = 1;
    pub const DOWN: u8 = 2;
    pub const UP: u8 = 3;
    pub const DELAY: u8 = 4;

    /// Lowest byte value treated as macro text rather than a tag.
    pub const TEXT_MIN: u8 = 8;
}

#[cfg(test)]
#[path = "keycodes_test.rs"]
mod test;
