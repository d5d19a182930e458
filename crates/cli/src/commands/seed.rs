//! Demo catalog seeding.

use serde_json::json;

use super::{Client, CliError};

/// A small catalog spanning every category, for local development.
const DEMO_PRODUCTS: &[(&str, &str, u64, &str, u32)] = &[
    (
        "Bluetooth Speaker",
        "Pocket speaker with 12h battery",
        8900,
        "electronics",
        25,
    ),
    (
        "Mechanical Keyboard",
        "Tenkeyless, brown switches",
        24900,
        "electronics",
        8,
    ),
    ("Linen Shirt", "Relaxed fit, stone washed", 6500, "clothing", 30),
    ("Wool Beanie", "Chunky knit merino", 2800, "clothing", 50),
    ("Walnut Desk Lamp", "Warm LED, touch dimmer", 4500, "home", 12),
    ("Ceramic Pour-Over Set", "Dripper plus 600ml carafe", 5400, "home", 9),
    ("City Sketching", "Urban drawing techniques", 3200, "books", 18),
    ("The Tide Atlas", "Coastal navigation handbook", 4100, "books", 6),
    ("Trail Bottle", "Insulated 750ml flask", 1200, "sports", 60),
    ("Climbing Chalk Bag", "Drawstring, fleece lined", 1900, "sports", 14),
];

/// Create the demo products through the admin API.
pub async fn run(client: &Client) -> Result<(), CliError> {
    for (name, description, price, category, stock) in DEMO_PRODUCTS {
        let payload = json!({
            "name": name,
            "description": description,
            "price": price,
            "category": category,
            "stock": stock,
            "image": format!("blob:demo/{}", name.to_lowercase().replace(' ', "-")),
            "contact_phone": "+15550100",
        });
        let created = client.post("/api/admin/products", &payload).await?;
        tracing::info!(
            "seeded {name} as {}",
            created.get("id").and_then(|v| v.as_str()).unwrap_or("?")
        );
    }
    tracing::info!("seeded {} products", DEMO_PRODUCTS.len());
    Ok(())
}
