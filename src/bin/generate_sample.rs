use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rusty_dash::config::DEFAULT_DATA_DIR;
use rusty_dash::datasets::{GraveyardProject, SalaryRecord, TypedRow, WeatherDay};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_csv<T: TypedRow + Serialize>(dir: &Path, rows: &[T]) -> Result<()> {
    let path = dir.join(T::FILE_NAME);
    let mut writer = csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Datasets
// ---------------------------------------------------------------------------

fn graveyard(rng: &mut SimpleRng) -> Vec<GraveyardProject> {
    let categories = ["Service", "App", "Hardware"];
    let stems = ["Reader", "Wave", "Buzz", "Allo", "Inbox", "Stadia", "Picasa", "Orkut", "Hangouts", "Glass"];
    let suffixes = ["", " Plus", " Lite", " for Work", " Labs"];

    let mut projects = Vec::new();
    for (i, stem) in stems.iter().enumerate() {
        for suffix in &suffixes {
            let start = 2002 + (rng.next_u64() % 18) as i32;
            let end = (start + 1 + (rng.next_u64() % 9) as i32).min(2023);
            projects.push(GraveyardProject {
                name: format!("Google {stem}{suffix}"),
                start,
                end,
                total_years: (end - start) as f64,
                category: rng.pick(&categories).to_string(),
                description: format!("Sample product #{i} that was discontinued in {end}."),
            });
        }
    }
    projects
}

fn salaries(rng: &mut SimpleRng) -> Vec<SalaryRecord> {
    let titles: [(&str, f64); 6] = [
        ("Data Scientist", 140_000.0),
        ("Data Engineer", 135_000.0),
        ("Data Analyst", 95_000.0),
        ("Machine Learning Engineer", 160_000.0),
        ("Analytics Engineer", 125_000.0),
        ("Research Scientist", 170_000.0),
    ];
    // (residence, currency, local units per USD, salary scale)
    let countries: [(&str, &str, f64, f64); 6] = [
        ("US", "USD", 1.0, 1.0),
        ("US", "USD", 1.0, 1.0),
        ("GB", "GBP", 0.8, 0.6),
        ("DE", "EUR", 0.92, 0.55),
        ("IN", "INR", 83.0, 0.2),
        ("CA", "CAD", 1.35, 0.7),
    ];
    let levels = ["EN", "MI", "SE", "EX"];
    let level_scale = [0.6, 0.85, 1.0, 1.5];
    let sizes = ["S", "M", "L"];
    let employment = ["FT", "FT", "FT", "CT", "PT"];
    let remote = [0.0, 50.0, 100.0];

    (0..600)
        .map(|_| {
            let (title, base) = *rng.pick(&titles);
            let (residence, currency, rate, scale) = *rng.pick(&countries);
            let level = (rng.next_u64() % levels.len() as u64) as usize;
            let usd = rng.gauss(base * scale * level_scale[level], 20_000.0 * scale).max(5_000.0).round();
            SalaryRecord {
                work_year: 2020.0 + (rng.next_u64() % 4) as f64,
                experience_level: levels[level].to_string(),
                employment_type: rng.pick(&employment).to_string(),
                job_title: title.to_string(),
                salary: (usd * rate).round(),
                salary_currency: currency.to_string(),
                salary_in_usd: usd,
                employee_residence: residence.to_string(),
                remote_ratio: *rng.pick(&remote),
                company_location: residence.to_string(),
                company_size: rng.pick(&sizes).to_string(),
            }
        })
        .collect()
}

fn weather(rng: &mut SimpleRng) -> Result<Vec<WeatherDay>> {
    let first = NaiveDate::from_ymd_opt(2015, 1, 1).context("invalid start date")?;
    let kinds = ["drizzle", "rain", "sun", "snow", "fog"];

    Ok((0..365i64)
        .map(|d| {
            let season = (2.0 * std::f64::consts::PI * (d as f64 - 200.0) / 365.0).cos();
            let temp_max = ((17.0 + 10.0 * season + rng.gauss(0.0, 2.5)) * 10.0).round() / 10.0;
            let temp_min = (temp_max - rng.range(4.0, 10.0)).round();
            let weather = rng.pick(&kinds).to_string();
            let precipitation = match weather.as_str() {
                "rain" | "snow" => (rng.range(1.0, 30.0) * 10.0).round() / 10.0,
                "drizzle" => (rng.range(0.0, 2.0) * 10.0).round() / 10.0,
                _ => 0.0,
            };
            WeatherDay {
                date: first + Duration::days(d),
                precipitation,
                temp_max,
                temp_min,
                wind: (rng.range(0.5, 8.0) * 10.0).round() / 10.0,
                weather,
            }
        })
        .collect())
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    write_csv(&dir, &graveyard(&mut rng))?;
    write_csv(&dir, &salaries(&mut rng))?;
    write_csv(&dir, &weather(&mut rng)?)?;

    log::info!("Sample datasets written to {}", dir.display());
    Ok(())
}
