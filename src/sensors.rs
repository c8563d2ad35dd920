use embedded_hal::delay::DelayNs;

use crate::config::{
    ADC_CHANNELS, ADC_MAX, MOISTURE_CHANNEL, PH_CHANNEL, PH_SCALE, SAMPLE_COUNT, SAMPLE_DELAY_US,
};

/// One snapshot of both sensors, normalized
/// moisture: Soil moisture percentage (0-100)
/// ph: Soil pH (0.0-14.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorReading {
    pub moisture: u8,
    pub ph: f32,
}

/// Single raw conversion on one ADC input
pub trait AdcReader {
    /// returns the 12-bit conversion result (0-4095)
    fn read_raw(&mut self, channel: u8) -> u16;
}

pub struct SensorSource<A, D> {
    adc: A,
    delay: D,
}

impl<A: AdcReader, D: DelayNs> SensorSource<A, D> {
    pub fn new(adc: A, delay: D) -> Self {
        Self { adc, delay }
    }

    /// Averages several conversions on one channel
    /// Channels outside the sensor inputs read as 0 (no signal)
    /// param channel: ADC input number
    /// returns the averaged raw value (0-4095)
    pub fn read_channel(&mut self, channel: u8) -> u16 {
        if channel >= ADC_CHANNELS {
            return 0;
        }

        let mut total: u32 = 0;
        for sample in 0..SAMPLE_COUNT {
            if sample > 0 {
                self.delay.delay_us(SAMPLE_DELAY_US);
            }
            total += u32::from(self.adc.read_raw(channel).min(ADC_MAX));
        }
        (total / SAMPLE_COUNT) as u16
    }

    /// Samples both sensors
    pub fn read(&mut self) -> SensorReading {
        let moisture = self.read_channel(MOISTURE_CHANNEL);
        let ph = self.read_channel(PH_CHANNEL);
        SensorReading {
            moisture: moisture_percent(moisture),
            ph: ph_value(ph),
        }
    }
}

/// Converts a raw reading into a moisture percentage
pub fn moisture_percent(raw: u16) -> u8 {
    (u32::from(raw.min(ADC_MAX)) * 100 / u32::from(ADC_MAX)) as u8
}

/// Converts a raw reading onto the 0-14 pH scale
pub fn ph_value(raw: u16) -> f32 {
    f32::from(raw.min(ADC_MAX)) * PH_SCALE / f32::from(ADC_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAdc {
        values: [u16; 5],
        reads: [u32; 5],
    }

    impl FakeAdc {
        fn new(values: [u16; 5]) -> Self {
            Self {
                values,
                reads: [0; 5],
            }
        }
    }

    impl AdcReader for FakeAdc {
        fn read_raw(&mut self, channel: u8) -> u16 {
            self.reads[channel as usize] += 1;
            self.values[channel as usize]
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn raw_scale_endpoints() {
        assert_eq!(moisture_percent(0), 0);
        assert_eq!(moisture_percent(4095), 100);
        assert_eq!(ph_value(0), 0.0);
        assert_eq!(ph_value(4095), 14.0);
    }

    #[test]
    fn out_of_range_raw_values_are_capped() {
        assert_eq!(moisture_percent(u16::MAX), 100);
        assert_eq!(ph_value(5000), 14.0);
    }

    #[test]
    fn midscale_reading() {
        assert_eq!(moisture_percent(2048), 50);
        assert!((ph_value(2048) - 7.0).abs() < 0.01);
    }

    #[test]
    fn read_channel_averages_samples() {
        let adc = FakeAdc::new([1000, 0, 0, 0, 0]);
        let mut source = SensorSource::new(adc, CountingDelay::default());
        assert_eq!(source.read_channel(0), 1000);
        assert_eq!(source.adc.reads[0], SAMPLE_COUNT);
        assert_eq!(
            source.delay.total_ns,
            u64::from(SAMPLE_COUNT - 1) * u64::from(SAMPLE_DELAY_US) * 1_000
        );
    }

    #[test]
    fn invalid_channel_reads_zero_without_sampling() {
        let adc = FakeAdc::new([4095; 5]);
        let mut source = SensorSource::new(adc, CountingDelay::default());
        assert_eq!(source.read_channel(4), 0);
        assert_eq!(source.read_channel(200), 0);
        assert_eq!(source.adc.reads, [0; 5]);
        assert_eq!(source.delay.total_ns, 0);
    }

    #[test]
    fn read_normalizes_both_sensors() {
        let adc = FakeAdc::new([4095, 2048, 0, 0, 0]);
        let mut source = SensorSource::new(adc, CountingDelay::default());
        let reading = source.read();
        assert_eq!(reading.moisture, 100);
        assert!((reading.ph - 7.0).abs() < 0.01);
    }
}
