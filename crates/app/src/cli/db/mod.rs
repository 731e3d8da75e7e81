use clap::{Args, Subcommand};
use vitrine::Amount;
use vitrine_app::{
    database::{self, Db},
    products::{NewProduct, PgProductsService, ProductsService},
};

const SCHEMA_SQL: &str = include_str!("../../../schema.sql");

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Create tables and seed the catalogue when it is empty
    Setup(SetupArgs),
}

#[derive(Debug, Args)]
struct SetupArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Setup(args) => setup(args).await,
    }
}

async fn setup(args: SetupArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    sqlx::raw_sql(SCHEMA_SQL)
        .execute(&pool)
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    println!("schema applied");

    let products = PgProductsService::new(Db::new(pool));

    let existing = products
        .count_products()
        .await
        .map_err(|error| format!("failed to count products: {error}"))?;

    if existing > 0 {
        println!("catalogue already seeded ({existing} products)");
        return Ok(());
    }

    for product in seed_products() {
        let created = products
            .create_product(product)
            .await
            .map_err(|error| format!("failed to seed product: {error}"))?;

        println!("seeded product: {} ({})", created.title, created.uuid);
    }

    Ok(())
}

fn seed_products() -> Vec<NewProduct> {
    let sizes = ["S", "M", "L", "XL"].map(String::from).to_vec();

    vec![
        NewProduct {
            title: "Waxed Field Jacket".to_string(),
            description: Some("Water-resistant cotton shell with corduroy collar.".to_string()),
            price: Amount::from_minor(259_000),
            original_price: Some(Amount::from_minor(299_000)),
            discount_percent: Some(13),
            rating: Some(4.7),
            image_url: Some("/images/p1.png".to_string()),
            category: Some("outerwear".to_string()),
            colors: vec!["olive".to_string(), "black".to_string()],
            sizes: sizes.clone(),
        },
        NewProduct {
            title: "Heavyweight Tee".to_string(),
            description: Some("240gsm combed cotton, preshrunk.".to_string()),
            price: Amount::from_minor(59_000),
            original_price: None,
            discount_percent: None,
            rating: Some(4.3),
            image_url: Some("/images/p2.png".to_string()),
            category: Some("tops".to_string()),
            colors: vec!["white".to_string(), "navy".to_string(), "sand".to_string()],
            sizes: sizes.clone(),
        },
        NewProduct {
            title: "Selvedge Denim".to_string(),
            description: Some("14oz Japanese selvedge, straight cut.".to_string()),
            price: Amount::from_minor(329_000),
            original_price: None,
            discount_percent: None,
            rating: Some(4.8),
            image_url: Some("/images/p3.png".to_string()),
            category: Some("bottoms".to_string()),
            colors: vec!["indigo".to_string()],
            sizes: sizes.clone(),
        },
        NewProduct {
            title: "Canvas High Top".to_string(),
            description: Some("Vulcanized sole, cotton laces.".to_string()),
            price: Amount::from_minor(189_000),
            original_price: Some(Amount::from_minor(219_000)),
            discount_percent: Some(14),
            rating: Some(4.5),
            image_url: Some("/images/p4.png".to_string()),
            category: Some("footwear".to_string()),
            colors: vec!["white".to_string(), "black".to_string()],
            sizes: vec!["40".to_string(), "41".to_string(), "42".to_string(), "43".to_string()],
        },
    ]
}
