//! Live endpoint example.
//!
//! Run with: cargo run --example live_grid
//!
//! Requires .env file with:
//! - QUOTEGRID_ENDPOINT

use std::env;

use quotegrid_lib::QuoteGridClient;
use quotegrid_lib::api::RequestState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let endpoint = env::var("QUOTEGRID_ENDPOINT").expect("QUOTEGRID_ENDPOINT not set");

    let grid = QuoteGridClient::builder().endpoint(endpoint).build()?;

    let mut query = grid.new_query();
    query.cycle_sort("change_pct");
    query.cycle_sort("change_pct");

    println!("Fetching top movers...\n");

    match grid.load(query).await {
        RequestState::Success(page) => {
            println!("Total: {}", page.total());
            for row in grid.view().rows {
                println!("{}: {}", row.key, row.cells[3].text);
            }
        }
        RequestState::Error(e) => println!("Failed: {}", e),
        other => println!("Unexpected state: {:?}", other),
    }

    Ok(())
}
