use serde::{Deserialize, Serialize};

/// Death-rate multiplier growth per squared tolerance width of deviation.
const STRESS_DEATH_SCALE: f64 = 4.0;
/// Extra death-rate factor applied outside the viable range.
const LETHAL_DEATH_FACTOR: f64 = 25.0;

/// Incubator conditions for a culture run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConditions {
    /// Temperature in °C.
    pub temperature: f64,
    /// CO2 fraction in %.
    pub co2: f64,
    /// Relative humidity in %.
    pub humidity: f64,
}

impl Default for EnvironmentConditions {
    fn default() -> Self {
        Self {
            temperature: 37.0,
            co2: 5.0,
            humidity: 95.0,
        }
    }
}

/// Response of growth and death rates to one environmental variable.
///
/// Within `[viable_min, viable_max]` growth decays as a Gaussian of the distance from
/// `nominal` (measured in units of `width`) and death rises quadratically. Outside the
/// viable range growth stops entirely and death is further multiplied by a lethal factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub nominal: f64,
    pub width: f64,
    pub viable_min: f64,
    pub viable_max: f64,
}

impl Tolerance {
    pub const fn new(nominal: f64, width: f64, viable_min: f64, viable_max: f64) -> Self {
        Self {
            nominal,
            width,
            viable_min,
            viable_max,
        }
    }

    #[inline]
    pub fn is_viable(&self, value: f64) -> bool {
        (self.viable_min..=self.viable_max).contains(&value)
    }

    #[inline]
    fn normalized_deviation(&self, value: f64) -> f64 {
        (value - self.nominal) / self.width
    }

    pub fn growth_factor(&self, value: f64) -> f64 {
        if !self.is_viable(value) {
            return 0.0;
        }
        let d = self.normalized_deviation(value);
        (-d * d).exp()
    }

    pub fn death_multiplier(&self, value: f64) -> f64 {
        let d = self.normalized_deviation(value);
        let stress = 1.0 + STRESS_DEATH_SCALE * d * d;
        if self.is_viable(value) {
            stress
        } else {
            stress * LETHAL_DEATH_FACTOR
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let finite = [self.nominal, self.width, self.viable_min, self.viable_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err("all tolerance bounds must be finite".to_string());
        }
        if self.width <= 0.0 {
            return Err(format!("width must be positive, got {}", self.width));
        }
        if !(self.viable_min <= self.nominal && self.nominal <= self.viable_max) {
            return Err(format!(
                "nominal value {} must lie within the viable range [{}, {}]",
                self.nominal, self.viable_min, self.viable_max
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTolerances {
    pub temperature: Tolerance,
    pub co2: Tolerance,
    pub humidity: Tolerance,
}

impl Default for EnvironmentTolerances {
    fn default() -> Self {
        Self {
            temperature: Tolerance::new(37.0, 2.5, 30.0, 42.0),
            co2: Tolerance::new(5.0, 3.0, 0.0, 15.0),
            humidity: Tolerance::new(95.0, 20.0, 40.0, 100.0),
        }
    }
}

impl EnvironmentTolerances {
    pub fn effect(&self, conditions: &EnvironmentConditions) -> EnvironmentEffect {
        let tolerances = [
            (self.temperature, conditions.temperature),
            (self.co2, conditions.co2),
            (self.humidity, conditions.humidity),
        ];
        EnvironmentEffect {
            growth_factor: tolerances
                .iter()
                .map(|(t, v)| t.growth_factor(*v))
                .product(),
            death_multiplier: tolerances
                .iter()
                .map(|(t, v)| t.death_multiplier(*v))
                .product(),
        }
    }
}

/// Combined multiplicative effect of all environmental variables on a culture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentEffect {
    /// Multiplier on cycle progression, in `[0, 1]`.
    pub growth_factor: f64,
    /// Multiplier on the baseline death rate, `>= 1`.
    pub death_multiplier: f64,
}

impl EnvironmentEffect {
    pub const NEUTRAL: Self = Self {
        growth_factor: 1.0,
        death_multiplier: 1.0,
    };
}
