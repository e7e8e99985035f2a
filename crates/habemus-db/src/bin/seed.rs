//! # Catalog Seeder
//!
//! Creates (or opens) a catalog database, inserts the reference products
//! when the table is empty and prints what is stored.
//!
//! ## Usage
//! ```bash
//! # Seed ./habemus_dev.db
//! cargo run -p habemus-db --bin seed
//!
//! # Specify database path
//! cargo run -p habemus-db --bin seed -- --db ./data/habemus.db
//! ```

use std::env;

use habemus_core::CustomerType;
use habemus_db::{Database, DbConfig};

const DEFAULT_DB_PATH: &str = "./habemus_dev.db";

fn print_usage() {
    println!("Habemus Catalog Seeder");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>    Database file path (default: {})", DEFAULT_DB_PATH);
    println!("  -h, --help         Show this help message");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from(DEFAULT_DB_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                } else {
                    eprintln!("--db needs a path");
                    print_usage();
                    std::process::exit(2);
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("🌱 Habemus Catalog Seeder");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let inserted = db.ensure_seeded().await?;
    if inserted == 0 {
        println!("⚠ Catalog already present, nothing inserted");
    } else {
        println!("✓ Inserted {} products", inserted);
    }

    println!();
    println!(
        "{:>3}  {:<36} {:>12} {:>12}",
        "ID",
        "NAME",
        CustomerType::ConsumerFinal.label(),
        CustomerType::Retailer.label()
    );
    for product in db.products().get_all().await? {
        println!(
            "{:>3}  {:<36} {:>12} {:>12}",
            product.id(),
            product.name(),
            product.price(CustomerType::ConsumerFinal).format_amount(),
            product.price(CustomerType::Retailer).format_amount()
        );
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
