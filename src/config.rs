/*** Thresholds ***/

// Irrigation stops once moisture reaches the profile minimum plus this offset
pub const SATISFIED_OFFSET: u8 = 40;

// Upper edges of the health bands, relative to the profile minimum
pub const HEALTH_YELLOW_BAND: u8 = 20;
pub const HEALTH_CYAN_BAND: u8 = 35;

pub const BUZZER_FREQUENCY_HZ: u32 = 1_000;

/*** ADC ***/

pub const ADC_MAX: u16 = 4095;
// GPIO26..GPIO29; the on-chip temperature sensor is not a valid sensor channel
pub const ADC_CHANNELS: u8 = 4;
pub const MOISTURE_CHANNEL: u8 = 0; // GPIO26
pub const PH_CHANNEL: u8 = 1; // GPIO27
pub const PH_SCALE: f32 = 14.0;
pub const SAMPLE_COUNT: u32 = 5;
pub const SAMPLE_DELAY_US: u32 = 2_000;

/*** PWM ***/

// 125MHz / 125 = 1MHz PWM tick
pub const PWM_CLOCK_DIVIDER: u8 = 125;
pub const PWM_TICK_HZ: u32 = 1_000_000;
// 50Hz period for the RGB LED channels
pub const LED_PWM_WRAP: u16 = 20_000;

/*** Display ***/

pub const DISPLAY_ADDRESS: u8 = 0x3C;
pub const DISPLAY_I2C_KHZ: u32 = 400;

/*** Queues ***/

pub const EVENT_QUEUE_CAPACITY: usize = 8;
