//! Writes a deterministic sample dataset (`sample_prices.csv`) so the
//! dashboard can be tried without real data:
//!
//! ```text
//! cargo run --bin generate_sample
//! cargo run -- sample_prices.csv
//! ```
//!
//! Dates are written raw; the loader applies its fixed offset on read.

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let models = ["Actual", "Prophet", "Regressor"];
    let categories = ["Detached", "Flat", "Terraced"];
    let postcodes: [(&str, f64); 3] = [("SW1", 720000.0), ("E2", 480000.0), ("M4", 310000.0)];

    // Weekly observations over two years, starting 2022-06-06.
    let start = chrono::NaiveDate::from_ymd_opt(2022, 6, 6).expect("valid start date");
    let weeks = 104;

    let output_path = "sample_prices.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["date", "Model", "Price Category", "postcode", "Value"])
        .expect("Failed to write header");

    let mut row_count = 0u32;
    for (postcode, base) in postcodes {
        for (cat_no, category) in categories.iter().enumerate() {
            // Each category trades at a different level around the base.
            let mut level = base * (1.0 - 0.18 * cat_no as f64);
            let drift = level * 0.0015;

            for week in 0..weeks {
                let date = start + chrono::Days::new(7 * week);
                level += drift + rng.gauss(0.0, level * 0.004);

                for model in models {
                    // Forecasts scatter around the actual path.
                    let noise = match model {
                        "Actual" => 0.0,
                        _ => rng.gauss(0.0, level * 0.01),
                    };
                    let value = (level + noise).max(1000.0);

                    writer
                        .write_record([
                            date.format("%Y-%m-%d").to_string(),
                            model.to_string(),
                            category.to_string(),
                            postcode.to_string(),
                            format!("{value:.2}"),
                        ])
                        .expect("Failed to write row");
                    row_count += 1;
                }
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {row_count} observations to {output_path}");
}
