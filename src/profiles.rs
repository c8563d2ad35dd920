use smart_leds::RGB8;

/// A 5x5 colour pattern for the LED matrix, indexed [row][col]
pub type Glyph = [[RGB8; 5]; 5];

/// Per-plant thresholds for moisture and pH
/// moisture_min: Moisture percentage below which irrigation starts
/// ph_min, ph_max: The acceptable pH band (inclusive)
/// glyph: Matrix pattern shown while the mode is selected
#[derive(Debug, PartialEq)]
pub struct ModeProfile {
    pub moisture_min: u8,
    pub ph_min: f32,
    pub ph_max: f32,
    pub glyph: &'static Glyph,
}

/// Where a pH value sits relative to a profile's band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhStatus {
    Low,
    Ok,
    High,
}

impl ModeProfile {
    pub fn ph_status(&self, ph: f32) -> PhStatus {
        if ph < self.ph_min {
            PhStatus::Low
        } else if ph > self.ph_max {
            PhStatus::High
        } else {
            PhStatus::Ok
        }
    }
}

/// Operating mode; one per supported plant profile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Hortalicas,
    Cactus,
    Orquidea,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Hortalicas, Mode::Cactus, Mode::Orquidea];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Mode> {
        Self::ALL.get(index).copied()
    }

    /// Cycles forward through the modes, wrapping after the last one
    pub fn next(self) -> Mode {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Hortalicas => "Hortalicas",
            Mode::Cactus => "Cactus",
            Mode::Orquidea => "Orquidea",
        }
    }

    pub fn profile(self) -> &'static ModeProfile {
        &PROFILES[self.index()]
    }
}

pub static PROFILES: [ModeProfile; 3] = [
    ModeProfile {
        moisture_min: 40,
        ph_min: 6.0,
        ph_max: 7.0,
        glyph: &HORTALICAS_GLYPH,
    },
    ModeProfile {
        moisture_min: 10,
        ph_min: 5.0,
        ph_max: 6.5,
        glyph: &CACTUS_GLYPH,
    },
    ModeProfile {
        moisture_min: 50,
        ph_min: 5.5,
        ph_max: 6.5,
        glyph: &ORQUIDEA_GLYPH,
    },
];

const O: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

// Leaf
const LEAF: RGB8 = RGB8 { r: 0, g: 40, b: 0 };
const VEIN: RGB8 = RGB8 { r: 0, g: 15, b: 0 };

// Cactus
const STEM: RGB8 = RGB8 { r: 0, g: 30, b: 5 };
const BLOOM: RGB8 = RGB8 { r: 40, g: 30, b: 0 };

// Orchid
pub const ORCHID_PURPLE: RGB8 = RGB8 { r: 40, g: 0, b: 40 };
pub const ORCHID_MAGENTA: RGB8 = RGB8 { r: 60, g: 0, b: 30 };
const LIP: RGB8 = RGB8 { r: 40, g: 40, b: 10 };
const SHOOT: RGB8 = RGB8 { r: 0, g: 20, b: 0 };

pub static HORTALICAS_GLYPH: Glyph = [
    [O, LEAF, LEAF, LEAF, O],
    [LEAF, LEAF, LEAF, LEAF, LEAF],
    [LEAF, LEAF, VEIN, LEAF, LEAF],
    [O, LEAF, VEIN, LEAF, O],
    [O, O, VEIN, O, O],
];

pub static CACTUS_GLYPH: Glyph = [
    [O, O, BLOOM, O, O],
    [STEM, O, STEM, O, O],
    [STEM, STEM, STEM, O, STEM],
    [O, O, STEM, STEM, STEM],
    [O, O, STEM, O, O],
];

pub static ORQUIDEA_GLYPH: Glyph = [
    [ORCHID_PURPLE, O, ORCHID_MAGENTA, O, ORCHID_PURPLE],
    [O, ORCHID_PURPLE, ORCHID_MAGENTA, ORCHID_PURPLE, O],
    [ORCHID_MAGENTA, ORCHID_MAGENTA, LIP, ORCHID_MAGENTA, ORCHID_MAGENTA],
    [O, ORCHID_PURPLE, SHOOT, ORCHID_PURPLE, O],
    [ORCHID_PURPLE, O, SHOOT, O, ORCHID_PURPLE],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_modes() {
        assert_eq!(Mode::Hortalicas.next(), Mode::Cactus);
        assert_eq!(Mode::Cactus.next(), Mode::Orquidea);
        assert_eq!(Mode::Orquidea.next(), Mode::Hortalicas);
    }

    #[test]
    fn index_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_index(mode.index()), Some(mode));
        }
        assert_eq!(Mode::from_index(3), None);
    }

    #[test]
    fn profiles_have_ordered_ph_bands() {
        for mode in Mode::ALL {
            let profile = mode.profile();
            assert!(profile.ph_min < profile.ph_max, "{}", mode.name());
            assert!(profile.moisture_min < 100);
        }
    }

    #[test]
    fn hortalicas_profile_matches_vegetable_thresholds() {
        let profile = Mode::Hortalicas.profile();
        assert_eq!(profile.moisture_min, 40);
        assert_eq!(profile.ph_min, 6.0);
        assert_eq!(profile.ph_max, 7.0);
    }

    #[test]
    fn ph_band_edges_are_inclusive() {
        let profile = Mode::Hortalicas.profile();
        assert_eq!(profile.ph_status(6.0), PhStatus::Ok);
        assert_eq!(profile.ph_status(7.0), PhStatus::Ok);
        assert_eq!(profile.ph_status(5.9), PhStatus::Low);
        assert_eq!(profile.ph_status(7.1), PhStatus::High);
    }

    #[test]
    fn each_mode_has_its_own_glyph() {
        assert!(core::ptr::eq(Mode::Cactus.profile().glyph, &CACTUS_GLYPH));
        assert!(core::ptr::eq(Mode::Orquidea.profile().glyph, &ORQUIDEA_GLYPH));
        assert_ne!(HORTALICAS_GLYPH, CACTUS_GLYPH);
    }

    #[test]
    fn default_mode_is_hortalicas() {
        assert_eq!(Mode::default(), Mode::Hortalicas);
    }
}
