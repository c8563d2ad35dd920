use crate::config::{
    BUZZER_FREQUENCY_HZ, HEALTH_CYAN_BAND, HEALTH_YELLOW_BAND, SATISFIED_OFFSET,
};
use crate::events::Event;
use crate::outputs::{BuzzerCommand, RgbLevels};
use crate::profiles::{Glyph, Mode, ModeProfile, PhStatus};
use crate::rendering::{status_lines, StatusLines};
use crate::sensors::SensorReading;
use crate::timer::{elapsed, Instant, ALARM_DURATION};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    #[default]
    Idle,
    Active { since: Instant },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Irrigation {
    #[default]
    Off,
    On,
}

/// What the main loop has to do after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handled {
    Done,
    RebootRequested,
}

/// Everything the indicators should show for one tick
#[derive(Debug)]
pub struct OutputCommand {
    /// Moisture health colour, before any alarm override
    pub health: RgbLevels,
    /// Levels to drive on the RGB LED
    pub rgb: RgbLevels,
    /// Only set on the ticks where the alarm starts or clears
    pub buzzer: Option<BuzzerCommand>,
    pub glyph: &'static Glyph,
    pub lines: StatusLines,
}

#[derive(Debug, Default)]
pub struct Controller {
    mode: Mode,
    alarm: Alarm,
    irrigation: Irrigation,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            mode: Mode::Hortalicas,
            alarm: Alarm::Idle,
            irrigation: Irrigation::Off,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn alarm(&self) -> Alarm {
        self.alarm
    }

    pub fn irrigation(&self) -> Irrigation {
        self.irrigation
    }

    pub fn alarm_active(&self) -> bool {
        matches!(self.alarm, Alarm::Active { .. })
    }

    pub fn irrigating(&self) -> bool {
        self.irrigation == Irrigation::On
    }

    /// Applies a button event
    /// Mode changes show up from the next tick on
    pub fn handle(&mut self, event: Event) -> Handled {
        match event {
            Event::AdvanceMode => {
                self.mode = self.mode.next();
                #[cfg(feature = "defmt")]
                defmt::info!("mode -> {}", self.mode);
                Handled::Done
            }
            Event::Acknowledge => {
                if self.irrigating() {
                    #[cfg(feature = "defmt")]
                    defmt::info!("irrigation acknowledged");
                }
                self.irrigation = Irrigation::Off;
                Handled::Done
            }
            Event::Reboot => Handled::RebootRequested,
        }
    }

    /// Runs one control step
    /// param reading: This tick's sensor snapshot
    /// param now: Current time
    /// returns the indicator state for this tick
    pub fn tick(&mut self, reading: SensorReading, now: Instant) -> OutputCommand {
        let profile = self.mode.profile();
        let mut buzzer = None;

        let irrigation_started = self.update_irrigation(reading.moisture, profile);

        if profile.ph_status(reading.ph) != PhStatus::Ok && self.trigger_alarm(now) {
            buzzer = Some(BuzzerCommand::Sound(BUZZER_FREQUENCY_HZ));
        }

        let mut cleared = false;
        if let Alarm::Active { since } = self.alarm {
            if elapsed(since, now) >= ALARM_DURATION {
                self.alarm = Alarm::Idle;
                buzzer = Some(BuzzerCommand::Silence);
                cleared = true;
                #[cfg(feature = "defmt")]
                defmt::info!("alarm cleared");
            }
        }

        // An irrigation edge on the expiry tick starts a fresh alarm
        if irrigation_started && self.trigger_alarm(now) {
            buzzer = Some(BuzzerCommand::Sound(BUZZER_FREQUENCY_HZ));
        }

        let health = health_levels(reading.moisture, profile);
        let rgb = if self.alarm_active() {
            RgbLevels::FULL
        } else if cleared {
            RgbLevels::OFF
        } else {
            health
        };

        OutputCommand {
            health,
            rgb,
            buzzer,
            glyph: profile.glyph,
            lines: status_lines(self.mode, self.irrigating(), &reading),
        }
    }

    /// returns true if irrigation was switched on by this call
    fn update_irrigation(&mut self, moisture: u8, profile: &ModeProfile) -> bool {
        match self.irrigation {
            Irrigation::Off if moisture < profile.moisture_min => {
                self.irrigation = Irrigation::On;
                #[cfg(feature = "defmt")]
                defmt::info!("irrigation on at {}%", moisture);
                true
            }
            Irrigation::On if is_satisfied(moisture, profile) => {
                self.irrigation = Irrigation::Off;
                #[cfg(feature = "defmt")]
                defmt::info!("irrigation off at {}%", moisture);
                false
            }
            _ => false,
        }
    }

    /// Starts the alarm unless it is already running
    /// returns true if the alarm was started by this call
    fn trigger_alarm(&mut self, now: Instant) -> bool {
        if self.alarm_active() {
            return false;
        }
        self.alarm = Alarm::Active { since: now };
        #[cfg(feature = "defmt")]
        defmt::info!("alarm triggered");
        true
    }
}

/// Moisture level at which irrigation stops
#[cfg(not(feature = "hysteresis-shutoff"))]
fn is_satisfied(moisture: u8, profile: &ModeProfile) -> bool {
    u16::from(moisture) == u16::from(profile.moisture_min) + u16::from(SATISFIED_OFFSET)
}

#[cfg(feature = "hysteresis-shutoff")]
fn is_satisfied(moisture: u8, profile: &ModeProfile) -> bool {
    u16::from(moisture) >= u16::from(profile.moisture_min) + u16::from(SATISFIED_OFFSET)
}

/// Colour encoding of soil moisture relative to a profile
/// Dry soil shows red, then yellow, cyan and finally blue as it gets wetter
/// param moisture: Moisture percentage
/// param profile: Active plant profile
/// returns RGB levels in percent
pub fn health_levels(moisture: u8, profile: &ModeProfile) -> RgbLevels {
    let m = u16::from(moisture);
    let min = u16::from(profile.moisture_min);
    let dry = percent(100 - i16::from(moisture.min(100)));
    let wet = percent(i16::from(moisture));

    if m < min {
        RgbLevels::new(dry, 0, 0)
    } else if m < min + u16::from(HEALTH_YELLOW_BAND) {
        RgbLevels::new(dry, dry, 0)
    } else if m < min + u16::from(HEALTH_CYAN_BAND) {
        RgbLevels::new(0, dry, wet)
    } else {
        RgbLevels::new(0, 0, wet)
    }
}

fn percent(value: i16) -> u8 {
    value.clamp(0, 100) as u8
}
