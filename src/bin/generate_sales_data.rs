use std::env;
use std::fs::{File, create_dir_all};
use std::io::{self, BufWriter, Write, stdout};
use std::path::Path;

use chrono::{Days, NaiveDate};
use rand::{Rng, RngExt};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

const PROBABILITY_BLANK_NAME: f64 = 0.002;
const PROBABILITY_BLANK_PRODUCT: f64 = 0.001;
const PROBABILITY_CORRUPT_SALES: f64 = 0.005;
const PROBABILITY_MALFORMED_CELL: f64 = 0.002;
const PROBABILITY_DUPLICATE_ROW: f64 = 0.003;

const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];
const PAYMENT_METHODS: [&str; 4] = ["card", "paypal", "bank_transfer", "cash"];
const CATEGORIES: [(&str, &[&str]); 5] = [
    ("Electronics", &["Laptop", "Smartphone", "Headphones", "Monitor"]),
    ("Furniture", &["Chair", "Table", "Desk", "Cabinet"]),
    ("Office Supplies", &["Paper", "Pen", "Notepad", "Stapler"]),
    ("Apparel", &["T-Shirt", "Jacket", "Shoes"]),
    ("Home", &["Cookware", "Bedding", "Decor"]),
];

const DATE_RANGE_DAYS: u64 = 730;

struct GeneratorConfig {
    num_records: usize,
    output_path: String,
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
        let output_path = args
            .get(2)
            .cloned()
            .unwrap_or_else(|| "samples/sales_data.csv".to_string());

        Self {
            num_records,
            output_path,
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!(
        "Generating {} sales records in {}...",
        config.num_records, config.output_path
    );

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "order_id,order_date,customer_id,customer_name,region,category,product,unit_price,quantity,sales,profit,payment_method"
    )?;

    let mut rng = rand::rng();
    let start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let mut previous_row = String::new();

    for order_id in 1..=config.num_records {
        let row = generate_row(&mut rng, order_id, start_date);
        writeln!(writer, "{}", row)?;

        //NOTE: Re-emitting the previous row gives the cleaner realistic exact duplicates to strip
        if !previous_row.is_empty() && rng.random_bool(PROBABILITY_DUPLICATE_ROW) {
            writeln!(writer, "{}", previous_row)?;
        }

        previous_row = row;

        if order_id % 1_000 == 0 {
            print!(".");
            stdout().flush()?;
        }
    }

    println!("\nGeneration complete.");

    Ok(())
}

fn generate_row<R: Rng>(rng: &mut R, order_id: usize, start_date: NaiveDate) -> String {
    let (category, products) = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
    let region = REGIONS[rng.random_range(0..REGIONS.len())];
    let payment = PAYMENT_METHODS[rng.random_range(0..PAYMENT_METHODS.len())];

    let customer_id = rng.random_range(1000..=9999);
    let order_date = random_date(rng, start_date);

    let unit_price = random_decimal(rng, 5.0, 2000.0);
    let quantity = random_quantity(rng);
    let sales = (unit_price * Decimal::from(quantity)).round_dp(2);
    let profit = (sales * random_decimal(rng, 0.05, 0.35)).round_dp(2);

    let customer_name = if rng.random_bool(PROBABILITY_BLANK_NAME) {
        String::new()
    } else {
        format!("Customer_{}", customer_id)
    };

    let product = if rng.random_bool(PROBABILITY_BLANK_PRODUCT) {
        ""
    } else {
        products[rng.random_range(0..products.len())]
    };

    let sales_cell = if rng.random_bool(PROBABILITY_CORRUPT_SALES) {
        corrupt_sales(rng, sales)
    } else {
        sales.to_string()
    };

    let unit_price_cell = if rng.random_bool(PROBABILITY_MALFORMED_CELL) {
        "n/a".to_string()
    } else {
        unit_price.to_string()
    };

    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{}",
        order_id,
        order_date,
        customer_id,
        customer_name,
        region,
        category,
        product,
        unit_price_cell,
        quantity,
        sales_cell,
        profit,
        payment
    )
}

fn random_date<R: Rng>(rng: &mut R, start_date: NaiveDate) -> NaiveDate {
    let offset = rng.random_range(0..DATE_RANGE_DAYS);

    start_date
        .checked_add_days(Days::new(offset))
        .unwrap_or(start_date)
}

fn random_decimal<R: Rng>(rng: &mut R, min: f64, max: f64) -> Decimal {
    Decimal::from_f64(rng.random_range(min..max))
        .unwrap_or(Decimal::ONE)
        .round_dp(2)
}

fn random_quantity<R: Rng>(rng: &mut R) -> i64 {
    // Weighted 60/20/10/7/3 toward single-item orders
    let roll: f64 = rng.random_range(0.0..1.0);

    if roll < 0.60 {
        1
    } else if roll < 0.80 {
        2
    } else if roll < 0.90 {
        3
    } else if roll < 0.97 {
        4
    } else {
        5
    }
}

fn corrupt_sales<R: Rng>(rng: &mut R, sales: Decimal) -> String {
    if rng.random_bool(0.5) {
        (sales * random_decimal(rng, 1.5, 4.0)).round_dp(2).to_string()
    } else {
        "n/a".to_string()
    }
}
