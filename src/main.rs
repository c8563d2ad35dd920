#![no_std]
#![no_main]

use bsp::entry;
use core::cell::RefCell;
use critical_section::Mutex;
use defmt::*;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_0_2::adc::OneShot;
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
use rp_pico as bsp;

use bsp::hal::{
    self,
    adc::{Adc, AdcPin},
    clocks::{init_clocks_and_plls, Clock},
    fugit::RateExtU32,
    gpio::bank0::{Gpio26, Gpio27, Gpio5, Gpio6},
    gpio::{FunctionI2C, FunctionSioInput, Interrupt, Pin, PullNone, PullUp},
    pac::{self, interrupt},
    pio::PIOExt,
    pwm::{FreeRunning, Pwm2, Pwm5, Pwm6, Slice, Slices},
    watchdog::Watchdog,
    Timer,
};
use irrigation_monitor::config::{
    DISPLAY_ADDRESS, DISPLAY_I2C_KHZ, LED_PWM_WRAP, MOISTURE_CHANNEL, PH_CHANNEL,
    PWM_CLOCK_DIVIDER, PWM_TICK_HZ,
};
use irrigation_monitor::controller::{Controller, Handled};
use irrigation_monitor::events::{Button, Debouncer, EventQueue};
use irrigation_monitor::matrix::{clear_matrix, show_glyph};
use irrigation_monitor::outputs::{
    apply, pulse, silence_all, BuzzerChannel, IndicatorOutputs, RgbChannel,
};
use irrigation_monitor::rendering::render_text;
use irrigation_monitor::sensors::{AdcReader, SensorSource};
use irrigation_monitor::timer::{Instant, LOOP_PERIOD_MS};
use ssd1306::{prelude::*, I2CDisplayInterface, Ssd1306};
use ws2812_pio::Ws2812;

type ButtonAPin = Pin<Gpio5, FunctionSioInput, PullUp>;
type ButtonBPin = Pin<Gpio6, FunctionSioInput, PullUp>;

/// State shared between the GPIO interrupt and the main loop
struct ButtonIrq {
    button_a: ButtonAPin,
    button_b: ButtonBPin,
    timer: Timer,
    debouncer: Debouncer,
    queue: EventQueue,
}

static BUTTON_IRQ: Mutex<RefCell<Option<ButtonIrq>>> = Mutex::new(RefCell::new(None));

impl ButtonIrq {
    fn edge(&mut self, button: Button, now: Instant) {
        if self.debouncer.accept(button, now) {
            // A full queue drops the press
            self.queue.push(button.event());
        }
    }
}

/// RGB LED and buzzers on the RP2040 PWM slices
/// GPIO10 (buzzer B) and GPIO11 (green) share slice 5, so a tone on
/// buzzer B also sets the green LED's period until the tone stops
struct Indicators {
    buzzer_a: Slice<Pwm2, FreeRunning>,
    shared: Slice<Pwm5, FreeRunning>,
    blue_red: Slice<Pwm6, FreeRunning>,
}

impl IndicatorOutputs for Indicators {
    // Duty cycle errors are Infallible on rp2040-hal
    fn set_level(&mut self, channel: RgbChannel, percent: u8) {
        match channel {
            RgbChannel::Green => {
                let duty = pulse(percent, self.shared.channel_b.max_duty_cycle());
                self.shared.channel_b.set_duty_cycle(duty).ok();
            }
            RgbChannel::Blue => {
                let duty = pulse(percent, self.blue_red.channel_a.max_duty_cycle());
                self.blue_red.channel_a.set_duty_cycle(duty).ok();
            }
            RgbChannel::Red => {
                let duty = pulse(percent, self.blue_red.channel_b.max_duty_cycle());
                self.blue_red.channel_b.set_duty_cycle(duty).ok();
            }
        }
    }

    fn start_tone(&mut self, buzzer: BuzzerChannel, frequency_hz: u32) {
        let top = (PWM_TICK_HZ / frequency_hz.max(1)).min(u32::from(u16::MAX)) as u16;
        match buzzer {
            BuzzerChannel::A => {
                self.buzzer_a.set_top(top);
                self.buzzer_a.channel_b.set_duty_cycle(top / 2).ok();
            }
            BuzzerChannel::B => {
                self.shared.set_top(top);
                self.shared.channel_a.set_duty_cycle(top / 2).ok();
            }
        }
    }

    fn stop_tone(&mut self, buzzer: BuzzerChannel) {
        match buzzer {
            BuzzerChannel::A => {
                self.buzzer_a.channel_b.set_duty_cycle(0).ok();
            }
            BuzzerChannel::B => {
                self.shared.channel_a.set_duty_cycle(0).ok();
                self.shared.set_top(LED_PWM_WRAP);
            }
        }
    }
}

/// Moisture and pH probes on ADC0/ADC1
struct BoardAdc {
    adc: Adc,
    moisture: AdcPin<Pin<Gpio26, FunctionSioInput, PullNone>>,
    ph: AdcPin<Pin<Gpio27, FunctionSioInput, PullNone>>,
}

impl AdcReader for BoardAdc {
    fn read_raw(&mut self, channel: u8) -> u16 {
        let sample: Option<u16> = match channel {
            MOISTURE_CHANNEL => nb::block!(self.adc.read(&mut self.moisture)).ok(),
            PH_CHANNEL => nb::block!(self.adc.read(&mut self.ph)).ok(),
            _ => None,
        };
        sample.unwrap_or(0)
    }
}

#[entry]
fn main() -> ! {
    info!("Irrigation monitor starting");
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = hal::Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut delay = timer;

    // Set up the RGB LED and buzzers: 1MHz PWM tick, LEDs at 50Hz
    let pwm_slices = Slices::new(pac.PWM, &mut pac.RESETS);
    let mut buzzer_a = pwm_slices.pwm2;
    let mut shared = pwm_slices.pwm5;
    let mut blue_red = pwm_slices.pwm6;
    buzzer_a.set_top(LED_PWM_WRAP);
    shared.set_top(LED_PWM_WRAP);
    blue_red.set_top(LED_PWM_WRAP);
    buzzer_a.set_div_int(PWM_CLOCK_DIVIDER);
    shared.set_div_int(PWM_CLOCK_DIVIDER);
    blue_red.set_div_int(PWM_CLOCK_DIVIDER);
    buzzer_a.enable();
    shared.enable();
    blue_red.enable();
    buzzer_a.channel_b.output_to(pins.gpio21);
    shared.channel_a.output_to(pins.gpio10);
    shared.channel_b.output_to(pins.gpio11);
    blue_red.channel_a.output_to(pins.gpio12);
    blue_red.channel_b.output_to(pins.gpio13);
    let mut indicators = Indicators {
        buzzer_a,
        shared,
        blue_red,
    };
    silence_all(&mut indicators);

    // Set up the LED matrix
    let (mut pio, sm0, _, _, _) = pac.PIO0.split(&mut pac.RESETS);
    let mut matrix = Ws2812::new(
        pins.gpio7.into_function(),
        &mut pio,
        sm0,
        clocks.peripheral_clock.freq(),
        timer.count_down(),
    );
    if clear_matrix(&mut matrix).is_err() {
        warn!("LED matrix clear failed");
    }

    // Set up the SSD1306 on I2C1
    let sda_pin: Pin<_, FunctionI2C, PullUp> = pins.gpio14.reconfigure();
    let scl_pin: Pin<_, FunctionI2C, PullUp> = pins.gpio15.reconfigure();
    let i2c = hal::I2C::i2c1(
        pac.I2C1,
        sda_pin,
        scl_pin,
        DISPLAY_I2C_KHZ.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_ADDRESS);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        warn!("Display init failed");
    }

    // Set up the moisture and pH probes
    let adc = Adc::new(pac.ADC, &mut pac.RESETS);
    let moisture = AdcPin::new(pins.gpio26.into_floating_input()).ok().unwrap();
    let ph = AdcPin::new(pins.gpio27.into_floating_input()).ok().unwrap();
    let mut sensors = SensorSource::new(BoardAdc { adc, moisture, ph }, timer);

    // Set up buttons A and B, active low
    let button_a: ButtonAPin = pins.gpio5.reconfigure();
    let button_b: ButtonBPin = pins.gpio6.reconfigure();
    button_a.set_interrupt_enabled(Interrupt::EdgeLow, true);
    button_b.set_interrupt_enabled(Interrupt::EdgeLow, true);
    critical_section::with(|cs| {
        BUTTON_IRQ.borrow(cs).replace(Some(ButtonIrq {
            button_a,
            button_b,
            timer,
            debouncer: Debouncer::new(),
            queue: EventQueue::new(),
        }));
    });
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }

    let mut controller = Controller::new();

    info!("Irrigation monitor ready");

    loop {
        let now = timer.get_counter();

        let pending = critical_section::with(|cs| {
            BUTTON_IRQ
                .borrow_ref_mut(cs)
                .as_mut()
                .map(|irq| core::mem::take(&mut irq.queue))
                .unwrap_or_default()
        });
        for event in pending {
            info!("event: {:?}", event);
            if controller.handle(event) == Handled::RebootRequested {
                silence_all(&mut indicators);
                if clear_matrix(&mut matrix).is_err() {
                    warn!("LED matrix clear failed");
                }
                cortex_m::peripheral::SCB::sys_reset();
            }
        }

        let reading = sensors.read();
        debug!("moisture: {}% pH: {}", reading.moisture, reading.ph);

        let command = controller.tick(reading, now);
        apply(&mut indicators, &command);

        if show_glyph(&mut matrix, command.glyph).is_err() {
            warn!("LED matrix write failed");
        }
        if render_text(&command.lines, &mut display)
            .and_then(|()| display.flush())
            .is_err()
        {
            warn!("Display refresh failed");
        }

        delay.delay_ms(LOOP_PERIOD_MS);
    }
}

#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        if let Some(irq) = BUTTON_IRQ.borrow_ref_mut(cs).as_mut() {
            let now = irq.timer.get_counter();
            if irq.button_a.interrupt_status(Interrupt::EdgeLow) {
                irq.button_a.clear_interrupt(Interrupt::EdgeLow);
                irq.edge(Button::A, now);
            }
            if irq.button_b.interrupt_status(Interrupt::EdgeLow) {
                irq.button_b.clear_interrupt(Interrupt::EdgeLow);
                irq.edge(Button::B, now);
            }
        }
    });
}
