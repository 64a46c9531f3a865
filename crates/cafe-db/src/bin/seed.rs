//! # Seed Data Generator
//!
//! Creates a Café Stock database with categories, products and staff
//! accounts. Users are only ever created here; the web app has no sign-up.
//!
//! ## Usage
//! ```bash
//! # Default database, one `admin` account (password `admin`)
//! cargo run -p cafe-db --bin seed
//!
//! # Specify database path and staff accounts
//! cargo run -p cafe-db --bin seed -- --db ./data/cafe.db \
//!     --user alice:s3cret --user bob:latte
//! ```
//!
//! Existing data is left alone: categories and products are only inserted
//! into an empty database, and users that already exist are skipped.

use std::env;

use cafe_core::credentials::hash_password;
use cafe_core::validation::validate_username;
use cafe_db::{Database, DbConfig, DbError};

/// Categories with their products and opening stock.
const CATALOG: &[(&str, &[(&str, i64)])] = &[
    (
        "Beans",
        &[
            ("Coffee Beans (House Blend)", 10),
            ("Espresso Roast", 8),
            ("Decaf Beans", 4),
            ("Single Origin Ethiopia", 3),
        ],
    ),
    (
        "Milk",
        &[
            ("Whole Milk", 20),
            ("Skim Milk", 10),
            ("Oat Milk", 12),
            ("Soy Milk", 6),
        ],
    ),
    (
        "Syrups",
        &[
            ("Vanilla Syrup", 6),
            ("Caramel Syrup", 5),
            ("Hazelnut Syrup", 4),
        ],
    ),
    (
        "Cups & Lids",
        &[
            ("Paper Cup 8oz", 500),
            ("Paper Cup 12oz", 500),
            ("Lid 8oz", 500),
            ("Lid 12oz", 500),
        ],
    ),
    (
        "Food",
        &[("Croissant", 24), ("Blueberry Muffin", 18), ("Banana Bread", 12)],
    ),
];

const DEFAULT_USER: (&str, &str) = ("admin", "admin");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./cafe_stock.db");
    let mut users: Vec<(String, String)> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--user" | "-u" => {
                if i + 1 < args.len() {
                    match args[i + 1].split_once(':') {
                        Some((name, password)) if !password.is_empty() => {
                            users.push((name.to_string(), password.to_string()));
                        }
                        _ => {
                            eprintln!("Invalid --user value '{}', expected NAME:PASSWORD", args[i + 1]);
                            std::process::exit(2);
                        }
                    }
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Café Stock Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>              Database file path (default: ./cafe_stock.db)");
                println!("  -u, --user <NAME:PASSWORD>   Staff account to create (repeatable, default: admin:admin)");
                println!("  -h, --help                   Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    if users.is_empty() {
        users.push((DEFAULT_USER.0.to_string(), DEFAULT_USER.1.to_string()));
    }

    println!("☕ Café Stock Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Catalog
    let existing = db.categories().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} categories, skipping catalog", existing);
    } else {
        let mut products = 0;
        for (category, items) in CATALOG {
            let category_id = db.categories().insert(category).await?;
            for (name, stock) in items.iter() {
                db.products().insert(name, category_id, *stock).await?;
                products += 1;
            }
        }
        println!(
            "✓ Inserted {} categories and {} products",
            CATALOG.len(),
            products
        );
    }

    // Staff accounts
    for (name, password) in &users {
        let name = match validate_username(name) {
            Ok(name) => name,
            Err(e) => {
                eprintln!("  Skipping user: {}", e);
                continue;
            }
        };

        let hash = hash_password(password)?;
        match db.users().insert(&name, &hash).await {
            Ok(id) => println!("✓ Created user '{}' (id {})", name, id),
            Err(DbError::UniqueViolation { .. }) => {
                println!("⚠ User '{}' already exists, skipping", name)
            }
            Err(e) => return Err(e.into()),
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
