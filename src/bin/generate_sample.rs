//! Write a deterministic `data.csv` for trying the viewer by hand.
//!
//! Usage: `generate_sample [OUTPUT] [--drift]`. With `--drift` the readings
//! climb past the calibration threshold.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

const ROWS: usize = 96;
const SENSORS: [&str; 3] = ["S-01", "S-02", "S-03"];

/// Seeded noise source: SplitMix64 for uniforms, Irwin-Hall sum of twelve
/// uniforms for an approximately normal draw.
struct Noise(u64);

impl Noise {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn normal(&mut self, std_dev: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.uniform()).sum();
        (sum - 6.0) * std_dev
    }
}

/// Daily sine cycle around `baseline`, plus noise, plus an optional linear
/// drift over the whole run.
fn reading(i: usize, baseline: f64, drift: f64, noise: &mut Noise) -> f64 {
    let phase = i as f64 / 24.0 * std::f64::consts::TAU;
    baseline + 8.0 * phase.sin() + drift * i as f64 / ROWS as f64 + noise.normal(1.5)
}

fn main() -> Result<()> {
    let mut output = String::from("data.csv");
    let mut drift = 0.0;
    for arg in std::env::args().skip(1) {
        if arg == "--drift" {
            drift = 60.0;
        } else {
            output = arg;
        }
    }

    let mut noise = Noise(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("building start timestamp")?;

    let mut writer = csv::Writer::from_path(&output).with_context(|| format!("creating {output}"))?;
    writer.write_record(["timestamp", "sensor_value", "sensor_id"])?;

    for i in 0..ROWS {
        let ts = start + Duration::hours(i as i64);
        let value = reading(i, 35.0, drift, &mut noise);
        writer.write_record([
            ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{value:.2}"),
            SENSORS[i % SENSORS.len()].to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {ROWS} readings to {output}");
    Ok(())
}
