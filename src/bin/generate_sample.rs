use anyhow::{Context, Result};

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

fn round_to(v: f64, decimals: i32) -> f64 {
    let p = 10f64.powi(decimals);
    (v * p).round() / p
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (manufacturer, models, base engine size, price premium)
    let lineup: [(&str, &[&str], f64, f64); 6] = [
        ("Ford", &["Escort", "Focus", "Taurus", "Mustang", "Explorer"], 2.8, 1.0),
        ("Honda", &["Civic", "Accord", "CR-V", "Odyssey"], 2.2, 1.05),
        ("Toyota", &["Corolla", "Camry", "Avalon", "4Runner", "Land Cruiser"], 2.6, 1.1),
        ("Chevrolet", &["Cavalier", "Malibu", "Impala", "Camaro", "Corvette"], 3.4, 0.95),
        ("BMW", &["323i", "328i", "528i"], 2.7, 1.9),
        ("Volkswagen", &["Golf", "Jetta", "Passat", "Beetle"], 2.0, 1.0),
    ];

    let output_path = "car-sales.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Manufacturer",
        "Model",
        "Sales In Thousands",
        "Price In Thousands",
        "Engine Size",
        "Horsepower",
        "Fuel Efficiency",
    ])?;

    let mut count = 0;
    for (manufacturer, models, base_engine, premium) in lineup {
        for (i, model) in models.iter().enumerate() {
            let engine = round_to(
                (base_engine + 0.45 * i as f64 + rng.gauss(0.0, 0.25)).clamp(1.0, 8.0),
                1,
            );
            let horsepower = (45.0 * engine + rng.gauss(20.0, 12.0)).round();
            let efficiency = (38.0 - 3.2 * engine + rng.gauss(0.0, 1.5)).round().max(12.0);
            let price = round_to(premium * (6.0 + 0.12 * horsepower + rng.gauss(0.0, 2.0)), 3);
            let sales = round_to((250.0 / (1.0 + price / 15.0) * rng.next_f64().max(0.1)).max(1.0), 3);

            writer.write_record([
                manufacturer.to_string(),
                model.to_string(),
                sales.to_string(),
                price.to_string(),
                engine.to_string(),
                horsepower.to_string(),
                efficiency.to_string(),
            ])?;
            count += 1;
        }
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {count} cars to {output_path}");
    Ok(())
}
