//! Live test against a running quote backend.
//!
//! Ignored by default. To run it, create a `.env` file in the quotegrid-lib
//! directory with:
//!
//! ```env
//! QUOTEGRID_ENDPOINT=http://localhost:8080/api/v1/stock/all
//! ```
//!
//! Then run: `cargo test -p quotegrid-lib -- --ignored`

use std::env;

use quotegrid_lib::GridConfig;
use quotegrid_lib::QuoteGridClient;
use quotegrid_lib::api::query::SortOrder;

fn load_env() -> Option<String> {
    let _ = dotenvy::dotenv();
    env::var("QUOTEGRID_ENDPOINT").ok()
}

#[tokio::test]
#[ignore = "requires a running quote backend configured in .env"]
async fn test_first_page() {
    let endpoint = load_env().expect("Missing QUOTEGRID_ENDPOINT. See module docs.");

    let grid = QuoteGridClient::from_config(
        GridConfig::default()
            .with_endpoint(endpoint)
            .with_null_data_is_empty(true),
    )
    .build()
    .expect("Invalid configuration");

    let query = grid.new_query().with_sort("change_pct", SortOrder::Desc);
    let state = grid.load(query).await;

    let page = state.page().expect("Load failed");
    assert!(page.len() <= 20);

    let view = grid.view();
    for row in &view.rows {
        assert!(!row.key.is_empty(), "row without a code: {:?}", row.cells);
    }
    if let Some(first) = view.rows.first() {
        assert!(!first.cells[1].text.is_empty(), "quote {} has no name", first.key);
    }
    println!("Loaded {} of {} quotes", page.len(), page.total());
}
