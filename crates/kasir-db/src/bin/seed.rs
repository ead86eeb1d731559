//! # Seed Data Generator
//!
//! Populates the database with demo categories and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir.db
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! Seeding is skipped when the database already has products.

use std::env;

use anyhow::{bail, Context};
use kasir_core::{CategoryInput, Money, ProductInput};
use kasir_db::{CategoryStore, Database, DbConfig, ProductStore};
use tracing_subscriber::EnvFilter;

/// Demo catalogue: category, description, products as (name, price, stock).
const CATALOGUE: &[(&str, &str, &[(&str, i64, i64)])] = &[
    (
        "Minuman",
        "Minuman dingin dan panas",
        &[
            ("Kopi Susu", 3500, 50),
            ("Kopi Hitam", 3000, 50),
            ("Teh Botol", 4000, 40),
            ("Es Jeruk", 5000, 30),
            ("Air Mineral 600ml", 3000, 100),
        ],
    ),
    (
        "Makanan",
        "Makanan ringan dan berat",
        &[
            ("Indomie Goreng", 3500, 80),
            ("Roti Bakar", 12000, 20),
            ("Nasi Goreng", 15000, 25),
            ("Pisang Goreng", 2000, 60),
        ],
    ),
    (
        "Kebutuhan Rumah",
        "Sabun, deterjen, dan lainnya",
        &[
            ("Sabun Mandi", 4500, 35),
            ("Pasta Gigi", 9000, 25),
            ("Deterjen 800g", 18500, 15),
        ],
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasir.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--db needs a path");
                };
                db_path = path.clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    println!("🌱 Kasir Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for (category_name, description, products) in CATALOGUE {
        let category = db
            .categories()
            .create(&CategoryInput {
                name: category_name.to_string(),
                description: Some(description.to_string()),
            })
            .await
            .with_context(|| format!("inserting category {category_name}"))?;

        for (name, price, stock) in products.iter() {
            let input = ProductInput {
                name: name.to_string(),
                price: Money::from_minor(*price),
                stock: *stock,
                category_id: category.id,
            };

            if let Err(e) = db.products().create(&input).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }

            generated += 1;
        }
    }

    println!();
    println!(
        "✓ Seeded {} categories and {} products",
        db.categories().count().await?,
        generated
    );

    db.close().await;
    Ok(())
}
