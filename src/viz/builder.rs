//! Chart construction for the raw data endpoints.

use serde_json::{json, Value};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Build a Vega-Lite v5 spec over row objects. Bar charts get an ordinal x
/// axis; every other mark gets a quantitative one. When the rows carry a
/// `metric` field the series are colored by it.
pub fn chart_spec(values: Vec<Value>, mark: &str, x_field: &str, y_field: &str, title: &str) -> Value {
    let x_type = if mark == "bar" { "ordinal" } else { "quantitative" };
    let colored = values
        .first()
        .and_then(|row| row.as_object())
        .map(|row| row.contains_key("metric"))
        .unwrap_or(false);

    let mut encoding = json!({
        "x": {"field": x_field, "type": x_type, "title": field_title(x_field)},
        "y": {"field": y_field, "type": "quantitative", "title": field_title(y_field)},
    });
    if colored {
        encoding["color"] = json!({"field": "metric", "type": "nominal"});
    }

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": title,
        "width": 600,
        "height": 400,
        "data": {"values": values},
        "mark": {"type": mark, "tooltip": true},
        "encoding": encoding,
    })
}

/// Horizontal bar ranking for the top-authors endpoint: author names on a
/// nominal y axis sorted by the metric value.
pub fn author_chart(values: Vec<Value>, metric_field: &str, top_n: usize) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": format!("Top {} Authors by {}", top_n, field_title(metric_field)),
        "width": 500,
        "height": 300,
        "data": {"values": values},
        "mark": {"type": "bar", "tooltip": true},
        "encoding": {
            "y": {"field": "display_name", "type": "nominal", "sort": "-x", "title": "Author"},
            "x": {"field": metric_field, "type": "quantitative", "title": field_title(metric_field)},
            "color": {"value": "#4a90d9"},
        },
    })
}

/// `paper_count` -> `Paper Count`, `h_index` -> `H Index`.
pub(crate) fn field_title(field: &str) -> String {
    field
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_rows() -> Vec<Value> {
        vec![
            json!({"year": 2023, "paper_count": 40}),
            json!({"year": 2024, "paper_count": 52}),
        ]
    }

    #[test]
    fn test_bar_chart_uses_ordinal_x() {
        let spec = chart_spec(year_rows(), "bar", "year", "paper_count", "Papers by Year");
        assert_eq!(spec["$schema"], VEGA_LITE_SCHEMA);
        assert_eq!(spec["mark"]["type"], "bar");
        assert_eq!(spec["mark"]["tooltip"], true);
        assert_eq!(spec["encoding"]["x"]["type"], "ordinal");
        assert_eq!(spec["encoding"]["y"]["title"], "Paper Count");
        assert_eq!(spec["width"], 600);
        assert_eq!(spec["height"], 400);
    }

    #[test]
    fn test_line_chart_uses_quantitative_x() {
        let spec = chart_spec(year_rows(), "line", "year", "paper_count", "Trend");
        assert_eq!(spec["encoding"]["x"]["type"], "quantitative");
        assert!(spec["encoding"]["color"].is_null());
    }

    #[test]
    fn test_metric_rows_get_color_encoding() {
        let rows = vec![json!({"year": 2024, "value": 10, "metric": "papers"})];
        let spec = chart_spec(rows, "line", "year", "value", "Yearly Trend: Papers");
        assert_eq!(spec["encoding"]["color"]["field"], "metric");
        assert_eq!(spec["encoding"]["color"]["type"], "nominal");
    }

    #[test]
    fn test_empty_rows_build_uncolored_chart() {
        let spec = chart_spec(Vec::new(), "bar", "year", "paper_count", "Empty");
        assert_eq!(spec["data"]["values"], json!([]));
        assert!(spec["encoding"]["color"].is_null());
    }

    #[test]
    fn test_author_chart_ranks_by_metric() {
        let rows = vec![json!({"display_name": "Ada", "h_index": 44})];
        let spec = author_chart(rows, "h_index", 5);
        assert_eq!(spec["title"], "Top 5 Authors by H Index");
        assert_eq!(spec["encoding"]["y"]["field"], "display_name");
        assert_eq!(spec["encoding"]["y"]["sort"], "-x");
        assert_eq!(spec["encoding"]["x"]["field"], "h_index");
        assert_eq!(spec["encoding"]["color"]["value"], "#4a90d9");
        assert_eq!(spec["width"], 500);
        assert_eq!(spec["height"], 300);
    }

    #[test]
    fn test_field_title_forms() {
        assert_eq!(field_title("paper_count"), "Paper Count");
        assert_eq!(field_title("h_index"), "H Index");
        assert_eq!(field_title("year"), "Year");
    }
}
