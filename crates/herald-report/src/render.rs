//! Artifact rendering — a short text summary for tiny results, an HTML
//! document for anything bigger.

use chrono::{DateTime, Utc};

use crate::source::ReportTable;

/// Row and column bounds below which a result fits in a plain message.
const TEXT_MAX_ROWS: usize = 4;
const TEXT_MAX_COLS: usize = 2;

/// A rendered report ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Short summary sent as a plain message.
    Text(String),
    /// Standalone document sent as a file upload.
    Document {
        file_name: String,
        caption: String,
        bytes: Vec<u8>,
    },
}

/// Render `table` for delivery.
///
/// Results with fewer than 4 rows and fewer than 2 columns are delivered as
/// text; everything else becomes an HTML document. The document name carries
/// the report id and the firing instant, so two concurrent firings never
/// produce the same name.
pub fn render(
    display_name: &str,
    report_id: &str,
    table: &ReportTable,
    fired_at: DateTime<Utc>,
) -> Artifact {
    if table.row_count() < TEXT_MAX_ROWS && table.column_count() < TEXT_MAX_COLS {
        Artifact::Text(render_text(display_name, table))
    } else {
        let stamp = fired_at.format("%Y%m%dT%H%M%SZ");
        Artifact::Document {
            file_name: format!("{report_id}-{stamp}.html"),
            caption: format!("{display_name} ({})", fired_at.format("%Y-%m-%d %H:%M UTC")),
            bytes: render_html(display_name, table).into_bytes(),
        }
    }
}

fn render_text(display_name: &str, table: &ReportTable) -> String {
    let mut out = String::from(display_name);
    if table.rows.is_empty() {
        out.push_str("\nno data");
        return out;
    }
    for row in &table.rows {
        out.push('\n');
        out.push_str(&row.join("  "));
    }
    out
}

fn render_html(title: &str, table: &ReportTable) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>");
    push_escaped(&mut html, title);
    html.push_str("</title><style>");
    html.push_str("body{font-family:sans-serif}");
    html.push_str("table{border-collapse:collapse}");
    html.push_str("td,th{border:1px solid #999;padding:4px 8px;text-align:left}");
    html.push_str("</style></head><body><h1>");
    push_escaped(&mut html, title);
    html.push_str("</h1><table><thead><tr>");
    for col in &table.columns {
        html.push_str("<th>");
        push_escaped(&mut html, col);
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            push_escaped(&mut html, cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></body></html>");
    html
}

fn push_escaped(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
