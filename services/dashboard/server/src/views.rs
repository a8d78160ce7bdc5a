//! HTML rendering for the two dashboard pages.
//!
//! Page shells are embedded at compile time; rows are built in Rust and
//! spliced into the `<!-- rows -->` marker. No template engine.

use chrono::{SecondsFormat, Utc};
use postgres_models::models::locations::Location;
use postgres_models::models::measurements::Measurement;

const MEASUREMENTS_TEMPLATE: &str = include_str!("templates/measurements.html");
const LOCATIONS_TEMPLATE: &str = include_str!("templates/locations.html");

const ROWS_MARKER: &str = "<!-- rows -->";
const GENERATED_MARKER: &str = "<!-- generated -->";

pub fn measurements_page(rows: &[Measurement]) -> String {
    let mut body = String::new();
    if rows.is_empty() {
        body.push_str("<tr><td colspan=\"3\">No measurements stored</td></tr>\n");
    }
    for m in rows {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            m.id,
            escape(&m.recorded_at),
            m.value,
        ));
    }
    render(MEASUREMENTS_TEMPLATE, &body)
}

pub fn locations_page(rows: &[Location]) -> String {
    let mut body = String::new();
    if rows.is_empty() {
        body.push_str("<tr><td colspan=\"6\">No locations stored</td></tr>\n");
    }
    for l in rows {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            l.id,
            escape(l.city.as_deref().unwrap_or("—")),
            escape(l.country.as_deref().unwrap_or("—")),
            opt_to_string(l.latitude),
            opt_to_string(l.longitude),
            opt_to_string(l.measurement_count),
        ));
    }
    render(LOCATIONS_TEMPLATE, &body)
}

fn render(template: &str, rows: &str) -> String {
    template.replace(ROWS_MARKER, rows).replace(
        GENERATED_MARKER,
        &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "—".to_string(), |v| v.to_string())
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("2017-09-25T15:00:00Z"), "2017-09-25T15:00:00Z");
    }

    #[test]
    fn test_measurements_page_renders_one_row_per_record() {
        let rows = vec![
            Measurement {
                id: 1,
                recorded_at: "2017-09-25T15:00:00Z".to_string(),
                value: 12.3,
            },
            Measurement {
                id: 2,
                recorded_at: "2017-09-25T14:00:00Z".to_string(),
                value: 9.0,
            },
        ];

        let html = measurements_page(&rows);
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("2017-09-25T15:00:00Z"));
        assert!(html.contains("12.3"));
        assert!(!html.contains("No measurements stored"));
    }

    #[test]
    fn test_measurements_page_empty_state() {
        let html = measurements_page(&[]);
        assert!(html.contains("No measurements stored"));
    }

    #[test]
    fn test_locations_page_renders_nullable_fields() {
        let rows = vec![Location {
            id: 7,
            city: Some("Los Angeles".to_string()),
            country: None,
            latitude: Some(34.05),
            longitude: None,
            measurement_count: Some(4242),
        }];

        let html = locations_page(&rows);
        assert!(html.contains("Los Angeles"));
        assert!(html.contains("34.05"));
        assert!(html.contains("4242"));
        assert!(html.contains("—"));
    }

    #[test]
    fn test_pages_escape_untrusted_strings() {
        let rows = vec![Location {
            id: 1,
            city: Some("<b>LA</b>".to_string()),
            country: None,
            latitude: None,
            longitude: None,
            measurement_count: None,
        }];

        let html = locations_page(&rows);
        assert!(html.contains("&lt;b&gt;LA&lt;/b&gt;"));
        assert!(!html.contains("<b>LA</b>"));
    }
}
