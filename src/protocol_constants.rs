// Register bytes of the seesaw expander protocol. Every request is a write of
// [module base, function register] optionally followed by a read.

// --- Status module ---
pub const STATUS_BASE: u8 = 0x00;
pub const STATUS_HW_ID: u8 = 0x01;
pub const STATUS_SWRST: u8 = 0x7F;

// --- GPIO module ---
pub const GPIO_BASE: u8 = 0x01;
pub const GPIO_BULK_INPUT: u8 = 0x04;

// --- ADC module ---
// The channel index is added to the offset to form the function register,
// so channel `n` is read through register `ADC_CHANNEL_OFFSET + n`.
pub const ADC_BASE: u8 = 0x09;
pub const ADC_CHANNEL_OFFSET: u8 = 0x07;

// --- Response sizes ---
pub const ADC_RESPONSE_LEN: usize = 2;
pub const HW_ID_RESPONSE_LEN: usize = 1;
pub const GPIO_BULK_RESPONSE_LEN: usize = 4;

// Linux i2c-dev ioctl request that targets a 7 bit device address.
pub const I2C_SLAVE: u64 = 0x0703;
