use crate::controller::OutputCommand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbChannel {
    Red,
    Green,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerChannel {
    A,
    B,
}

impl RgbChannel {
    pub const ALL: [RgbChannel; 3] = [RgbChannel::Red, RgbChannel::Green, RgbChannel::Blue];
}

impl BuzzerChannel {
    pub const ALL: [BuzzerChannel; 2] = [BuzzerChannel::A, BuzzerChannel::B];
}

/// Brightness of each RGB channel in percent (0-100)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbLevels {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbLevels {
    pub const OFF: RgbLevels = RgbLevels::new(0, 0, 0);
    pub const FULL: RgbLevels = RgbLevels::new(100, 100, 100);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const fn level(&self, channel: RgbChannel) -> u8 {
        match channel {
            RgbChannel::Red => self.red,
            RgbChannel::Green => self.green,
            RgbChannel::Blue => self.blue,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerCommand {
    Sound(u32),
    Silence,
}

/// Sink for the indicator peripherals
pub trait IndicatorOutputs {
    fn set_level(&mut self, channel: RgbChannel, percent: u8);

    fn stop(&mut self, channel: RgbChannel) {
        self.set_level(channel, 0);
    }

    fn start_tone(&mut self, buzzer: BuzzerChannel, frequency_hz: u32);

    fn stop_tone(&mut self, buzzer: BuzzerChannel);
}

/// Maps a percentage onto a duty cycle range
/// param percent: Requested level; anything above 100 counts as 100
/// param max_duty: Duty value meaning fully on
/// returns the duty cycle
pub fn pulse(percent: u8, max_duty: u16) -> u16 {
    (u32::from(max_duty) * u32::from(percent.min(100)) / 100) as u16
}

/// Pushes one tick's indicator state out to the hardware
pub fn apply<O: IndicatorOutputs>(outputs: &mut O, command: &OutputCommand) {
    for channel in RgbChannel::ALL {
        match command.rgb.level(channel) {
            0 => outputs.stop(channel),
            level => outputs.set_level(channel, level),
        }
    }

    match command.buzzer {
        Some(BuzzerCommand::Sound(frequency_hz)) => {
            for buzzer in BuzzerChannel::ALL {
                outputs.start_tone(buzzer, frequency_hz);
            }
        }
        Some(BuzzerCommand::Silence) => {
            for buzzer in BuzzerChannel::ALL {
                outputs.stop_tone(buzzer);
            }
        }
        None => {}
    }
}

/// Turns every indicator off, e.g. right before a reboot
pub fn silence_all<O: IndicatorOutputs>(outputs: &mut O) {
    for channel in RgbChannel::ALL {
        outputs.stop(channel);
    }
    for buzzer in BuzzerChannel::ALL {
        outputs.stop_tone(buzzer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::sensors::SensorReading;
    use crate::timer::instant_from_millis;

    /// Records the last value written to every output
    #[derive(Debug, Default)]
    struct RecordingOutputs {
        rgb: [Option<u8>; 3],
        tones: [Option<u32>; 2],
        tone_writes: usize,
    }

    impl IndicatorOutputs for RecordingOutputs {
        fn set_level(&mut self, channel: RgbChannel, percent: u8) {
            self.rgb[channel as usize] = Some(percent);
        }

        fn start_tone(&mut self, buzzer: BuzzerChannel, frequency_hz: u32) {
            self.tones[buzzer as usize] = Some(frequency_hz);
            self.tone_writes += 1;
        }

        fn stop_tone(&mut self, buzzer: BuzzerChannel) {
            self.tones[buzzer as usize] = None;
            self.tone_writes += 1;
        }
    }

    #[test]
    fn pulse_maps_percent_to_duty() {
        assert_eq!(pulse(0, 20_000), 0);
        assert_eq!(pulse(65, 20_000), 13_000);
        assert_eq!(pulse(100, 20_000), 20_000);
    }

    #[test]
    fn pulse_clamps_above_full() {
        assert_eq!(pulse(101, 20_000), 20_000);
        assert_eq!(pulse(u8::MAX, u16::MAX), u16::MAX);
    }

    #[test]
    fn pulse_is_monotonic() {
        let mut previous = 0;
        for percent in 0..=100 {
            let duty = pulse(percent, 20_000);
            assert!(duty >= previous, "{percent}");
            previous = duty;
        }
    }

    #[test]
    fn alarm_entry_drives_everything() {
        let mut controller = Controller::new();
        let reading = SensorReading {
            moisture: 35,
            ph: 6.5,
        };
        let command = controller.tick(reading, instant_from_millis(0));

        let mut outputs = RecordingOutputs::default();
        apply(&mut outputs, &command);
        assert_eq!(outputs.rgb, [Some(100); 3]);
        assert_eq!(outputs.tones, [Some(1_000); 2]);
    }

    #[test]
    fn quiet_tick_leaves_buzzers_alone() {
        let mut controller = Controller::new();
        let reading = SensorReading {
            moisture: 90,
            ph: 6.5,
        };
        let command = controller.tick(reading, instant_from_millis(0));

        let mut outputs = RecordingOutputs::default();
        apply(&mut outputs, &command);
        assert_eq!(outputs.tone_writes, 0);
        assert_eq!(outputs.rgb, [Some(0), Some(0), Some(90)]);
    }

    #[test]
    fn silence_all_stops_every_channel() {
        let mut outputs = RecordingOutputs {
            rgb: [Some(100); 3],
            tones: [Some(1_000); 2],
            tone_writes: 0,
        };
        silence_all(&mut outputs);
        assert_eq!(outputs.rgb, [Some(0); 3]);
        assert_eq!(outputs.tones, [None; 2]);
    }
}
