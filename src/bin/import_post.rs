use std::env;
use std::io::Read;
use std::sync::Arc;

use anyhow::anyhow;

use channelpost_rs::constants::DATABASE_URL_VAR;
use channelpost_rs::db;
use channelpost_rs::handler::{ChannelDB, WithDB};
use channelpost_rs::models::PostImport;

fn main() -> Result<(), anyhow::Error> {
    let dbfile = env::var(DATABASE_URL_VAR)
        .map_err(|e| anyhow!("error reading env var {}: {:?}", DATABASE_URL_VAR, e))?;
    let dbpool = Arc::new(channelpost_rs::new_dbconn_pool(&dbfile)?);

    // read in the post document from stdin
    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body)?;

    let import: PostImport = serde_json::from_str(&body)?;

    let store = ChannelDB::new(dbpool);
    let new_post = import.as_new_post();
    let inserted = store
        .run_txn(|conn| db::insert_post(conn, &new_post))
        .map_err(|e| anyhow!("error storing post: {:?}", e))?;

    if inserted {
        println!("stored post with message_id {}", import.message_id);
    } else {
        println!("post {} already exists, skipped", import.message_id);
    }

    Ok(())
}
