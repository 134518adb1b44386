use std::fmt::Write;

use super::assets::{template, INDEX_TEMPLATE};
use crate::error_handling::types::WebError;
use crate::storage::TimeRecord;

const TIMES_PLACEHOLDER: &str = "{{times}}";

/// Renders the index page with one `time-item` per record, in order.
pub fn render_index(times: &[TimeRecord]) -> Result<String, WebError> {
    let page = template(INDEX_TEMPLATE)
        .ok_or_else(|| WebError::MissingAsset(INDEX_TEMPLATE.to_string()))?;
    let mut items = String::new();
    for time in times {
        let text = escape_html(time.as_str());
        // writing to a String cannot fail
        let _ = write!(
            items,
            "\n      <div class=\"time-item\"><span>{text}</span>\
             <button class=\"delete-btn\" data-time=\"{text}\">&times;</button></div>"
        );
    }
    Ok(page.replace(TIMES_PLACEHOLDER, &items))
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
