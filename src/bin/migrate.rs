use std::env;

use anyhow::anyhow;
use diesel::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use channelpost_rs::constants::DATABASE_URL_VAR;
use channelpost_rs::db;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dbfile = env::var(DATABASE_URL_VAR)
        .map_err(|e| anyhow!("error reading env var {}: {:?}", DATABASE_URL_VAR, e))?;

    let mut conn = SqliteConnection::establish(&dbfile)?;
    db::run_migrations(&mut conn)?;
    info!("database migration completed for {:?}", dbfile);

    Ok(())
}
