//! Built-in market-quote columns

use crate::render::RenderPolicy;

use super::ColumnSpec;
use super::Pinned;

/// Row key of the quote catalog.
pub const QUOTE_ROW_KEY: &str = "code";

/// Returns the standard A-share quote columns in display order.
///
/// Keys are the ASCII names used for sorting and filtering (the quote
/// backend filters on `code` and `name`); rows arrive keyed by the backend's
/// Chinese field names. Security code and name are pinned left; daily change
/// is rendered as a signed percentage and the absolute change as a signed
/// delta.
pub fn quote_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("code", "Code").field("代码").width(100).pinned(Pinned::Left),
        ColumnSpec::new("name", "Name").field("名称").width(120).pinned(Pinned::Left),
        ColumnSpec::new("latest_price", "Latest").field("最新价").sortable(),
        ColumnSpec::new("change_pct", "Change %")
            .field("涨跌幅")
            .sortable()
            .render(RenderPolicy::SignedPercent),
        ColumnSpec::new("change_amt", "Change")
            .field("涨跌额")
            .render(RenderPolicy::SignedDelta),
        ColumnSpec::new("volume", "Volume").field("成交量").width(120).sortable(),
        ColumnSpec::new("turnover", "Turnover").field("成交额").width(120).sortable(),
        ColumnSpec::new("amplitude", "Amplitude").field("振幅").sortable(),
        ColumnSpec::new("high", "High").field("最高"),
        ColumnSpec::new("low", "Low").field("最低"),
        ColumnSpec::new("open", "Open").field("今开"),
        ColumnSpec::new("prev_close", "Prev Close").field("昨收"),
        ColumnSpec::new("volume_ratio", "Vol Ratio").field("量比").sortable(),
        ColumnSpec::new("turnover_rate", "Turnover %").field("换手率").sortable(),
        ColumnSpec::new("pe_dynamic", "P/E").field("市盈率-动态").sortable(),
        ColumnSpec::new("pb", "P/B").field("市净率").sortable(),
        ColumnSpec::new("total_market_cap", "Market Cap")
            .field("总市值")
            .width(120)
            .sortable(),
        ColumnSpec::new("circ_market_cap", "Float Cap")
            .field("流通市值")
            .width(120)
            .sortable(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnModel;

    #[test]
    fn test_catalog_is_valid() {
        let validated = ColumnModel::new(quote_columns()).unwrap();
        let prebuilt = ColumnModel::quotes();
        assert_eq!(validated.columns(), prebuilt.columns());
        assert_eq!(prebuilt.row_key(), QUOTE_ROW_KEY);
        assert_eq!(prebuilt.len(), 18);
    }

    #[test]
    fn test_catalog_policies() {
        let model = ColumnModel::quotes();
        assert_eq!(
            model.resolve("change_pct").unwrap().render_policy,
            RenderPolicy::SignedPercent
        );
        assert_eq!(
            model.resolve("change_amt").unwrap().render_policy,
            RenderPolicy::SignedDelta
        );
        assert!(!model.is_sortable("change_amt"));
        assert!(!model.is_sortable("high"));
        assert!(model.is_sortable("volume"));
    }

    #[test]
    fn test_reads_backend_rows() {
        let page = crate::api::ResultMapper::new()
            .map(serde_json::json!({
                "data": [{ "代码": "600000", "名称": "浦发银行", "涨跌幅": 1.1, "涨跌额": 0.11 }],
                "total": 1
            }))
            .unwrap();
        let model = ColumnModel::quotes();
        let row = &page.rows()[0];

        assert_eq!(model.row_id(row), "600000");
        let texts: Vec<_> = model.format_row(row).into_iter().map(|c| c.text).collect();
        assert_eq!(&texts[..5], &["600000", "浦发银行", "", "+1.1%", "+0.11"]);
    }
}
