//! Server-rendered HTML views.

use crate::core::form::{Field, FormErrors, Submission};
use crate::models::record::LedgerRow;
use crate::models::reference::ReferenceData;
use crate::web::FORM_TOKEN_FIELD;
use std::fmt::Write;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a value for use as one URL path segment.
pub fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

pub fn listing_url(operator: &str) -> String {
    format!("/machine/{}", encode_segment(operator))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn home_page(refs: &ReferenceData) -> String {
    let mut body = String::from("<h1>Machine Run Log</h1>\n");
    if refs.operators.is_empty() {
        body.push_str("<p>No operators configured.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for op in refs.operators.values() {
            let seg = encode_segment(op);
            let _ = writeln!(
                body,
                "<li>{} &middot; <a href=\"/add/{seg}\">Add record</a> &middot; \
                 <a href=\"/machine/{seg}\">Today</a></li>",
                escape(op)
            );
        }
        body.push_str("</ul>\n");
    }
    page("Machine Run Log", &body)
}

/// Add and edit share one form; `action` is the POST target.
pub fn form_page(
    title: &str,
    action: &str,
    operator: &str,
    refs: &ReferenceData,
    form_token: &str,
    values: &Submission,
    errors: Option<&FormErrors>,
) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{} &ndash; {}</h1>", escape(title), escape(operator));
    let _ = writeln!(body, "<form method=\"post\" action=\"{}\">", escape(action));
    let _ = writeln!(
        body,
        "<input type=\"hidden\" name=\"{FORM_TOKEN_FIELD}\" value=\"{}\">",
        escape(form_token)
    );

    for field in Field::ALL {
        let key = field.key();
        let value = values.value(field);
        let required = if field.is_required() { " required" } else { "" };

        let _ = writeln!(body, "<p>\n<label for=\"{key}\">{}</label>", escape(field.label()));
        match field.choices() {
            Some(kind) => {
                let _ = writeln!(body, "<select id=\"{key}\" name=\"{key}\"{required}>");
                for choice in refs.list(kind).values() {
                    let selected = if choice == value { " selected" } else { "" };
                    let _ = writeln!(
                        body,
                        "<option value=\"{0}\"{selected}>{0}</option>",
                        escape(choice)
                    );
                }
                body.push_str("</select>\n");
            }
            None => {
                let _ = writeln!(
                    body,
                    "<input type=\"text\" id=\"{key}\" name=\"{key}\" value=\"{}\"{required}>",
                    escape(value)
                );
            }
        }
        if let Some(err) = errors.and_then(|e| e.get(field)) {
            let _ = writeln!(body, "<span class=\"error\">{}</span>", escape(&err.to_string()));
        }
        body.push_str("</p>\n");
    }

    body.push_str("<p><button type=\"submit\">Submit</button></p>\n</form>\n");
    let _ = writeln!(body, "<p><a href=\"{}\">Back to list</a></p>", listing_url(operator));
    page(title, &body)
}

/// Table of a day's ledger. `rows[0]` is the header; data rows get
/// Edit/Delete links addressed by their position.
pub fn listing_page(operator: &str, date_stamp: &str, rows: &[LedgerRow]) -> String {
    let seg = encode_segment(operator);
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h1>{} &ndash; {}</h1>\n<p><a href=\"/add/{seg}\">Add record</a></p>",
        escape(operator),
        escape(date_stamp)
    );

    body.push_str("<table>\n");
    if let Some(header) = rows.first() {
        body.push_str("<thead><tr><th>#</th>");
        for h in header {
            let _ = write!(body, "<th>{}</th>", escape(h));
        }
        body.push_str("<th></th></tr></thead>\n");
    }

    body.push_str("<tbody>\n");
    for (index, row) in rows.iter().enumerate().skip(1) {
        let _ = write!(body, "<tr><td>{index}</td>");
        for cell in row {
            let _ = write!(body, "<td>{}</td>", escape(cell));
        }
        let _ = writeln!(
            body,
            "<td><a href=\"/edit/{seg}/{index}\">Edit</a> \
             <a href=\"/delete/{seg}/{index}\">Delete</a></td></tr>"
        );
    }
    body.push_str("</tbody>\n</table>\n<p><a href=\"/\">Home</a></p>\n");

    page(&format!("{operator} {date_stamp}"), &body)
}
