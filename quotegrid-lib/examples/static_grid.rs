//! Offline grid example.
//!
//! Run with: cargo run --example static_grid
//!
//! Serves one canned page through `StaticTransport` and prints every
//! snapshot the grid publishes.

use quotegrid_lib::QuoteGridClient;
use quotegrid_lib::api::query::SortOrder;
use quotegrid_lib::transport::StaticTransport;
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let body = json!({
        "total": 2,
        "data": [
            { "代码": "600519", "名称": "贵州茅台", "最新价": 1688.0, "涨跌幅": 1.25, "涨跌额": 20.85 },
            { "代码": "000001", "名称": "平安银行", "最新价": 10.42, "涨跌幅": -0.38, "涨跌额": -0.04 }
        ]
    });

    let grid = QuoteGridClient::builder()
        .endpoint("http://localhost:8080/api/v1/stock/all")
        .transport(StaticTransport::new(body))
        .build()?;

    let mut updates = grid.subscribe();
    let printer = {
        let grid = grid.clone();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let view = grid.project(&updates.borrow_and_update());
                println!("loading={} rows={} total={}", view.loading, view.rows.len(), view.total);
                if !view.loading {
                    break;
                }
            }
        })
    };

    let query = grid.new_query().with_sort("change_pct", SortOrder::Desc);
    grid.load(query).await;
    printer.await?;

    let view = grid.view();
    let labels: Vec<_> = view.columns.iter().take(5).map(|c| c.label.as_str()).collect();
    println!("\n{}", labels.join(" | "));
    for row in &view.rows {
        let cells: Vec<_> = row.cells.iter().take(5).map(|c| c.text.as_str()).collect();
        println!("{}", cells.join(" | "));
    }

    Ok(())
}
