use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::products::{ProductsService, SqliteProductsService, data::default_catalog},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetupArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SetupArgs) -> Result<(), String> {
    let pool = database::connect(&args.database.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let seeded = SqliteProductsService::new(Db::new(pool))
        .seed_products(default_catalog())
        .await
        .map_err(|error| format!("failed to seed catalog: {error}"))?;

    println!("migrations applied");
    println!("products seeded: {seeded}");

    Ok(())
}
