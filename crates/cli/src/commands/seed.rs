//! Seed the starter catalogue.
//!
//! Categories are matched by name and products by (name, brand, pack size),
//! so running the command again only adds what is missing. New products go
//! through the stock ledger, which records their opening stock as an IN
//! movement created by `System`.

use rust_decimal::Decimal;
use tracing::info;

use stockroom_admin::db::{
    CategoryRepository, MovementRepository, ProductRepository, ReportRepository,
};
use stockroom_admin::models::{NewCategory, ProductInput};
use stockroom_admin::services::StockLedger;
use stockroom_core::ledger::CREATED_BY_SYSTEM;
use stockroom_core::{CategoryId, Price};

use super::{CliError, connect};

struct SeedCategory {
    name: &'static str,
    description: &'static str,
}

struct SeedProduct {
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    unit: &'static str,
    pack_size: &'static str,
    description: &'static str,
    current_stock: i32,
    minimum_stock: i32,
    /// Whole rupees.
    cost_price: i64,
    selling_price: i64,
}

const CEMENT: &str = "Cement";
const STEEL: &str = "Steel & TMT Bars";
const PAINTS: &str = "Paints & Coatings";
const ADHESIVES: &str = "Tile Adhesives & Grouts";
const TOOLS: &str = "Construction Tools";

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: CEMENT,
        description: "Ordinary Portland Cement and specialty cement products",
    },
    SeedCategory {
        name: STEEL,
        description: "TMT bars, steel rods, and reinforcement materials",
    },
    SeedCategory {
        name: PAINTS,
        description: "Interior, exterior paints and protective coatings",
    },
    SeedCategory {
        name: ADHESIVES,
        description: "Tile fixing adhesives, grouts, and waterproofing materials",
    },
    SeedCategory {
        name: TOOLS,
        description: "Hand tools, power tools, and construction equipment",
    },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "UltraTech Ordinary Portland Cement",
        brand: "UltraTech",
        category: CEMENT,
        unit: "Bag",
        pack_size: "50KG",
        description: "High quality OPC cement for all construction needs",
        current_stock: 150,
        minimum_stock: 50,
        cost_price: 350,
        selling_price: 380,
    },
    SeedProduct {
        name: "Amba Shakti Portland Cement",
        brand: "Amba Shakti",
        category: CEMENT,
        unit: "Bag",
        pack_size: "50KG",
        description: "Premium quality cement for superior strength",
        current_stock: 80,
        minimum_stock: 30,
        cost_price: 345,
        selling_price: 375,
    },
    SeedProduct {
        name: "Kamdhenu TMT Bar Fe 500",
        brand: "Kamdhenu",
        category: STEEL,
        unit: "Ton",
        pack_size: "12mm",
        description: "High strength TMT bars for earthquake resistant construction",
        current_stock: 5,
        minimum_stock: 2,
        cost_price: 52_000,
        selling_price: 54_000,
    },
    SeedProduct {
        name: "Kamdhenu TMT Bar Fe 500",
        brand: "Kamdhenu",
        category: STEEL,
        unit: "Ton",
        pack_size: "16mm",
        description: "High strength TMT bars for heavy construction",
        current_stock: 3,
        minimum_stock: 1,
        cost_price: 52_500,
        selling_price: 54_500,
    },
    SeedProduct {
        name: "Berger Weathercoat Long Life",
        brand: "Berger",
        category: PAINTS,
        unit: "Bucket",
        pack_size: "20L",
        description: "Premium exterior emulsion paint with 12 year warranty",
        current_stock: 25,
        minimum_stock: 10,
        cost_price: 3_200,
        selling_price: 3_500,
    },
    SeedProduct {
        name: "Berger Silk Glamour Interior Paint",
        brand: "Berger",
        category: PAINTS,
        unit: "Bucket",
        pack_size: "20L",
        description: "Luxury silk finish interior emulsion paint",
        current_stock: 18,
        minimum_stock: 8,
        cost_price: 2_800,
        selling_price: 3_100,
    },
    SeedProduct {
        name: "UltraTech Tilefixo Super",
        brand: "UltraTech",
        category: ADHESIVES,
        unit: "Bag",
        pack_size: "20KG",
        description: "Premium tile adhesive for wall and floor tiles",
        current_stock: 40,
        minimum_stock: 15,
        cost_price: 420,
        selling_price: 450,
    },
    SeedProduct {
        name: "Birla Opus Tile Grout",
        brand: "Birla Opus",
        category: ADHESIVES,
        unit: "Bag",
        pack_size: "5KG",
        description: "High quality grout for tile joints",
        current_stock: 60,
        minimum_stock: 20,
        cost_price: 180,
        selling_price: 200,
    },
    SeedProduct {
        name: "Steel Trowel 10 inch",
        brand: "Local",
        category: TOOLS,
        unit: "Piece",
        pack_size: "10 inch",
        description: "High quality steel trowel for plastering work",
        current_stock: 12,
        minimum_stock: 5,
        cost_price: 120,
        selling_price: 150,
    },
    SeedProduct {
        name: "Spirit Level 2 feet",
        brand: "Stanley",
        category: TOOLS,
        unit: "Piece",
        pack_size: "2 feet",
        description: "Precision spirit level for accurate measurements",
        current_stock: 8,
        minimum_stock: 3,
        cost_price: 450,
        selling_price: 520,
    },
];

/// Row counts after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_added: usize,
    pub products_added: usize,
    pub categories: i64,
    pub products: i64,
    pub movements: i64,
}

impl SeedProduct {
    fn input(&self, category_id: CategoryId) -> Result<ProductInput, CliError> {
        let price = |amount: i64, field: &'static str| -> Result<Option<Price>, CliError> {
            Ok(Some(Price::new(Decimal::from(amount), field)?))
        };

        Ok(ProductInput {
            name: self.name.to_string(),
            brand: Some(self.brand.to_string()),
            category_id,
            unit: Some(self.unit.to_string()),
            pack_size: Some(self.pack_size.to_string()),
            description: Some(self.description.to_string()),
            current_stock: self.current_stock,
            minimum_stock: self.minimum_stock,
            cost_price: price(self.cost_price, "cost_price")?,
            selling_price: price(self.selling_price, "selling_price")?,
        })
    }
}

/// Seed categories and products.
pub async fn run() -> Result<SeedSummary, CliError> {
    let pool = connect().await?;
    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);
    let ledger = StockLedger::new(&pool, CREATED_BY_SYSTEM);

    info!("Starting database seeding...");

    let mut categories_added = 0;
    for seed in CATEGORIES {
        if categories.get_by_name(seed.name).await?.is_some() {
            continue;
        }
        let input = NewCategory::parse(seed.name, Some(seed.description))?;
        categories.create(&input).await?;
        categories_added += 1;
        info!("Added category: {}", seed.name);
    }

    let mut products_added = 0;
    for seed in PRODUCTS {
        let existing = products
            .find_by_identity(seed.name, Some(seed.brand), Some(seed.pack_size))
            .await?;
        if existing.is_some() {
            continue;
        }

        let category = categories
            .get_by_name(seed.category)
            .await?
            .ok_or(CliError::MissingCategory(seed.category))?;

        ledger.create_product(&seed.input(category.id)?).await?;
        products_added += 1;
        info!("Added product: {} - {}", seed.name, seed.brand);
    }

    let counts = ReportRepository::new(&pool).dashboard_counts().await?;
    let summary = SeedSummary {
        categories_added,
        products_added,
        categories: counts.total_categories,
        products: counts.total_products,
        movements: MovementRepository::new(&pool).count().await?,
    };

    info!("Seeding complete!");
    info!("Summary:");
    info!("- Categories: {} ({} added)", summary.categories, summary.categories_added);
    info!("- Products: {} ({} added)", summary.products, summary.products_added);
    info!("- Stock Movements: {}", summary.movements);

    Ok(summary)
}
