//! Demo Mode - Simulated battery telemetry for running without a backend
//!
//! Generates plausible pack readings with a slowly degrading health figure,
//! then estimates health and remaining range from the operating conditions
//! the same way the backend reports them.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::FetchError;
use crate::source::TelemetrySource;
use crate::telemetry::Snapshot;

/// Range of a fully healthy pack (km)
const BASE_DISTANCE_KM: f64 = 400.0;

/// Round to one decimal place
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Operating conditions for one simulated reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Pack temperature (°C)
    pub temperature: f64,
    /// Depth of discharge (%)
    pub dod: f64,
    /// Charge/discharge rate
    pub c_rate: f64,
    /// Road inclination (degrees)
    pub inclination: f64,
    /// Vehicle load (kg)
    pub load: f64,
    /// Jerk (m/s³)
    pub jerk: f64,
}

impl OperatingPoint {
    /// Energy drawn under these conditions (kWh)
    pub fn power_consumption(&self) -> f64 {
        const BASE_CONSUMPTION: f64 = 5.0;
        let load_factor = self.load / 100.0;
        let inclination_factor = 1.0 + self.inclination.abs() / 45.0;
        let jerk_factor = 1.0 + self.jerk / 5.0;
        round1(BASE_CONSUMPTION * load_factor * inclination_factor * jerk_factor)
    }

    /// Health lost by the pack during one reading (percentage points)
    pub fn health_degradation(&self) -> f64 {
        let temp = ((self.temperature - 30.0) / 1000.0).max(0.0);
        let dod = if self.dod > 20.0 {
            (self.dod - 20.0) / 5000.0
        } else {
            0.0
        };
        let c_rate = (self.c_rate - 1.0) / 2000.0;
        let jerk = self.jerk / 1000.0;
        temp + dod + c_rate + jerk
    }
}

/// Health (%) and remaining range (km) estimated from operating conditions
pub fn estimate_health(op: &OperatingPoint) -> (f64, f64) {
    let temp_loss = ((op.temperature - 25.0) / 25.0 * 15.0).clamp(0.0, 15.0);
    let dod_loss = ((op.dod - 20.0) / 75.0 * 20.0).clamp(0.0, 20.0);
    let c_rate_loss = ((op.c_rate - 0.5) / 2.0 * 10.0).clamp(0.0, 10.0);
    let incl_loss = (op.inclination.abs() / 15.0 * 5.0).clamp(0.0, 5.0);
    let load_loss = ((op.load - 50.0) / 250.0 * 5.0).clamp(0.0, 5.0);
    let jerk_loss = (op.jerk / 3.0 * 5.0).clamp(0.0, 5.0);

    let health = 100.0
        - (0.4 * temp_loss
            + 0.3 * dod_loss
            + 0.2 * c_rate_loss
            + 0.05 * incl_loss
            + 0.03 * load_loss
            + 0.02 * jerk_loss);

    let efficiency = 0.9
        + 0.1
            * (25.0 / op.temperature.clamp(25.0, 50.0))
            * (1.0 - 0.2 * (op.dod.clamp(20.0, 95.0) - 20.0) / 75.0)
            * (1.0 - 0.1 * (op.c_rate.clamp(0.5, 2.5) - 0.5) / 2.0);
    let distance = BASE_DISTANCE_KM * (health / 100.0) * efficiency;

    (round1(health).clamp(0.0, 100.0), round1(distance).max(0.0))
}

/// Simulated battery pack
pub struct BatterySimulator {
    /// Cumulative health of the pack (%)
    current_health: f64,
    /// Random number generator
    rng: StdRng,
}

impl Default for BatterySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BatterySimulator {
    /// Create a simulator seeded from entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a simulator with a fixed seed (reproducible output)
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            current_health: 100.0,
            rng,
        }
    }

    /// Cumulative pack health after all readings so far
    pub fn pack_health(&self) -> f64 {
        self.current_health
    }

    /// Draw the operating conditions for the next reading
    pub fn next_operating_point(&mut self) -> OperatingPoint {
        OperatingPoint {
            temperature: round1(self.rng.gen_range(25.0..=45.0)),
            dod: self.rng.gen_range(10..=95) as f64,
            c_rate: round1(self.rng.gen_range(0.5..=2.5)),
            inclination: self.rng.gen_range(-15..=15) as f64,
            load: self.rng.gen_range(50..=300) as f64,
            jerk: round1(self.rng.gen_range(0.1..=3.0)),
        }
    }

    /// Generate the next full snapshot
    pub fn generate(&mut self) -> Snapshot {
        let op = self.next_operating_point();

        self.current_health = (self.current_health - op.health_degradation()).clamp(0.0, 100.0);

        let (health, remaining_distance) = estimate_health(&op);

        Snapshot {
            health: Some(health),
            remaining_distance: Some(remaining_distance),
            temperature: Some(op.temperature),
            dod: Some(op.dod),
            power_consumption: Some(op.power_consumption()),
            voltage: Some(round1(self.rng.gen_range(45.0..=52.0))),
            current: Some(round1(self.rng.gen_range(50.0..=200.0))),
            inclination: Some(op.inclination),
            load: Some(op.load),
            jerk: Some(op.jerk),
            c_rate: Some(op.c_rate),
            timestamp: Some(
                chrono::Local::now()
                    .format("%Y-%m-%dT%H:%M:%S%.3f")
                    .to_string(),
            ),
        }
    }
}

/// Telemetry source backed by [`BatterySimulator`]
pub struct DemoSource {
    simulator: Mutex<BatterySimulator>,
}

impl DemoSource {
    /// Demo source seeded from entropy
    pub fn new() -> Self {
        Self::with_simulator(BatterySimulator::new())
    }

    /// Demo source driven by an existing simulator
    pub fn with_simulator(simulator: BatterySimulator) -> Self {
        Self {
            simulator: Mutex::new(simulator),
        }
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySource for DemoSource {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let mut sim = self
            .simulator
            .lock()
            .map_err(|_| FetchError::Unavailable("demo simulator poisoned".to_string()))?;
        Ok(sim.generate())
    }

    fn describe(&self) -> String {
        "demo simulator".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_within_ranges() {
        let mut sim = BatterySimulator::seeded(42);
        for _ in 0..200 {
            let snap = sim.generate();
            let t = snap.temperature.unwrap();
            assert!((25.0..=45.0).contains(&t), "temperature {}", t);
            let dod = snap.dod.unwrap();
            assert!((10.0..=95.0).contains(&dod) && dod.fract() == 0.0);
            let incl = snap.inclination.unwrap();
            assert!((-15.0..=15.0).contains(&incl));
            let v = snap.voltage.unwrap();
            assert!((45.0..=52.0).contains(&v));
            let health = snap.health.unwrap();
            assert!((0.0..=100.0).contains(&health));
            assert!(snap.remaining_distance.unwrap() >= 0.0);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = BatterySimulator::seeded(7);
        let mut b = BatterySimulator::seeded(7);
        for _ in 0..5 {
            let (sa, sb) = (a.generate(), b.generate());
            assert_eq!(sa.load, sb.load);
            assert_eq!(sa.voltage, sb.voltage);
        }
    }

    #[test]
    fn test_pack_health_stays_clamped() {
        let mut sim = BatterySimulator::seeded(1);
        assert_eq!(sim.pack_health(), 100.0);
        for _ in 0..100 {
            sim.generate();
            assert!(sim.pack_health() <= 100.0);
        }
        assert!(sim.pack_health() < 100.0);
    }

    #[test]
    fn test_power_consumption_formula() {
        let op = OperatingPoint {
            temperature: 30.0,
            dod: 50.0,
            c_rate: 1.0,
            inclination: -9.0,
            load: 200.0,
            jerk: 1.0,
        };
        // 5 * 2 * 1.2 * 1.2
        assert_eq!(op.power_consumption(), 14.4);
    }

    #[test]
    fn test_estimate_health_ideal_conditions() {
        let op = OperatingPoint {
            temperature: 25.0,
            dod: 20.0,
            c_rate: 0.5,
            inclination: 0.0,
            load: 50.0,
            jerk: 0.0,
        };
        let (health, distance) = estimate_health(&op);
        assert_eq!(health, 100.0);
        assert_eq!(distance, 400.0);
    }

    #[test]
    fn test_estimate_health_worst_case() {
        let op = OperatingPoint {
            temperature: 50.0,
            dod: 95.0,
            c_rate: 2.5,
            inclination: 15.0,
            load: 300.0,
            jerk: 3.0,
        };
        let (health, distance) = estimate_health(&op);
        // 0.4*15 + 0.3*20 + 0.2*10 + 0.05*5 + 0.03*5 + 0.02*5 = 14.5
        assert_eq!(health, 85.5);
        assert!(distance < 400.0 * 0.855);
    }

    #[tokio::test]
    async fn test_demo_source_fetch() {
        let source = DemoSource::with_simulator(BatterySimulator::seeded(3));
        let snap = source.fetch().await.unwrap();
        assert!(snap.power_consumption.is_some());
        assert_eq!(source.describe(), "demo simulator");
    }
}
