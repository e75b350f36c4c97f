use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::products::{ProductsService, SqliteProductsService},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListArgs) -> Result<(), String> {
    let pool = database::connect(&args.database.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let products = SqliteProductsService::new(Db::new(pool))
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("catalog is empty; run `storefront-app db setup` first");
    }

    for product in products {
        println!(
            "{}\t{}\t{}\t{}",
            product.id,
            product.name,
            product.price,
            product.description.unwrap_or_default()
        );
    }

    Ok(())
}
