use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::prediction::Weather;

/// Supplies one weather condition per simulated day.
pub trait WeatherSource {
    fn next_weather(&mut self) -> Weather;
}

/// Uniform draw over the three conditions (1/3 each).
#[derive(Debug, Clone)]
pub struct RandomWeather<R = StdRng> {
    rng: R,
}

impl RandomWeather<StdRng> {
    /// Unseeded; every prediction gets fresh draws.
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> RandomWeather<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> WeatherSource for RandomWeather<R> {
    fn next_weather(&mut self) -> Weather {
        Weather::ALL[self.rng.gen_range(0..Weather::ALL.len())]
    }
}

/// Replays a fixed sequence, wrapping around at the end.
/// An empty script yields `Sunny` every day.
#[derive(Debug, Clone)]
pub struct ScriptedWeather {
    script: Vec<Weather>,
    cursor: usize,
}

impl ScriptedWeather {
    pub fn new(script: impl Into<Vec<Weather>>) -> Self {
        Self { script: script.into(), cursor: 0 }
    }

    pub fn constant(weather: Weather) -> Self {
        Self::new(vec![weather])
    }
}

impl WeatherSource for ScriptedWeather {
    fn next_weather(&mut self) -> Weather {
        if self.script.is_empty() {
            return Weather::Sunny;
        }
        let weather = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        weather
    }
}
