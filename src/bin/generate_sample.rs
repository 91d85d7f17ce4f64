use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const STATES: [(&str, &[&str]); 4] = [
    ("NY", &["10001", "10002", "11201"]),
    ("GA", &["30301", "30305"]),
    ("IL", &["60142", "60601"]),
    ("MS", &["39120"]),
];

const TRANSACTION_TYPES: [&str; 7] = [
    "Bills",
    "Education",
    "Entertainment",
    "Gas",
    "Grocery",
    "Healthcare",
    "Test",
];

const FIRST_NAMES: [&str; 6] = ["Alec", "Etta", "Wilber", "Eugenio", "Wilhelmina", "Homer"];
const LAST_NAMES: [&str; 5] = ["Hooper", "Holman", "Dunham", "Trahan", "Lacy"];

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

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

struct Customer {
    ssn: u64,
    state: &'static str,
    zip: &'static str,
}

fn write_customers(path: &Path, customers: &[Customer], rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["SSN", "FIRST_NAME", "LAST_NAME", "CUST_STATE", "CUST_ZIP"])?;
    for c in customers {
        writer.write_record([
            c.ssn.to_string(),
            rng.pick(&FIRST_NAMES).to_string(),
            rng.pick(&LAST_NAMES).to_string(),
            c.state.to_string(),
            c.zip.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_transactions(
    path: &Path,
    customers: &[Customer],
    count: usize,
    rng: &mut SimpleRng,
) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "CUST_CC_NO",
        "TIMEID",
        "CUST_SSN",
        "BRANCH_CODE",
        "TRANSACTION_TYPE",
        "TRANSACTION_VALUE",
        "TRANSACTION_ID",
    ])?;

    let mut orphans = 0;
    for id in 1..=count {
        // Every 25th transaction belongs to nobody; the inner join drops it.
        let ssn = if id % 25 == 0 {
            orphans += 1;
            999_000_000 + id as u64
        } else {
            rng.pick(customers).ssn
        };
        let year = 2018 + rng.below(2);
        let month = 1 + rng.below(12);
        let day = 1 + rng.below(28);
        let cents = 100 + rng.below(9_900);

        writer.write_record([
            format!("42106533{:08}", ssn % 100_000_000),
            format!("{year}{month:02}{day:02}"),
            ssn.to_string(),
            (1 + rng.below(200)).to_string(),
            rng.pick(&TRANSACTION_TYPES).to_string(),
            format!("{}.{:02}", cents / 100, cents % 100),
            id.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(orphans)
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("cleaned_files"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let customers: Vec<Customer> = (0..40)
        .map(|i| {
            let (state, zips) = *rng.pick(&STATES);
            Customer {
                ssn: 123_450_000 + i * 37,
                state,
                zip: *rng.pick(zips),
            }
        })
        .collect();

    let customer_path = out_dir.join("cleaned_customer.csv");
    let credit_path = out_dir.join("cleaned_credit.csv");
    let transactions = 1_000;

    write_customers(&customer_path, &customers, &mut rng)?;
    let orphans = write_transactions(&credit_path, &customers, transactions, &mut rng)?;

    println!(
        "Wrote {} customers to {} and {transactions} transactions ({orphans} without a customer) to {}",
        customers.len(),
        customer_path.display(),
        credit_path.display()
    );
    Ok(())
}
