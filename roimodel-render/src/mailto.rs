use crate::ReportDocument;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// RFC 3986 unreserved characters stay literal.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `mailto:` link whose subject is the report title and whose body is the plain-text report.
pub fn render_mailto(doc: &ReportDocument) -> String {
    let body = doc.to_plain_text().replace('\n', "\r\n");
    format!(
        "mailto:?subject={}&body={}",
        utf8_percent_encode(&doc.title, QUERY_VALUE),
        utf8_percent_encode(&body, QUERY_VALUE)
    )
}
