use chrono::{DateTime, NaiveDate, Utc};

use crate::handlers::book_call_dtos::{present, BookCallRequest};

const DATE_FORMAT: &str = "%A, %B %-d, %Y";

#[derive(Debug, Clone, PartialEq)]
pub struct BookingNotification {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// "Monday, November 2, 2026" for `YYYY-MM-DD` or RFC 3339 input. Anything
/// else is returned as sent.
pub fn format_preferred_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "Not specified".to_string();
    };

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

fn field(label: &str, value_html: &str) -> String {
    format!(
        r#"<div class="field"><div class="label">{}</div><div class="value">{}</div></div>"#,
        label, value_html
    )
}

pub fn render_notification(
    request: &BookCallRequest,
    from: &str,
    to: &str,
    received_at: DateTime<Utc>,
) -> BookingNotification {
    let name = escape_html(request.name.trim());
    let email = escape_html(request.email.trim());
    let service = escape_html(request.service.trim());

    let mut fields = vec![
        field("Client Name", &name),
        field("Email Address", &format!(r#"<a href="mailto:{0}">{0}</a>"#, email)),
    ];
    if let Some(phone) = present(&request.phone) {
        fields.push(field("Phone Number", &format!(r#"<a href="tel:{0}">{0}</a>"#, escape_html(phone))));
    }
    if let Some(company) = present(&request.company) {
        fields.push(field("Company", &escape_html(company)));
    }
    fields.push(field("Service Interested In", &format!("<strong>{}</strong>", service)));
    fields.push(field(
        "Preferred Call Date",
        &escape_html(&format_preferred_date(request.preferred_date.as_deref())),
    ));
    if let Some(message) = present(&request.message) {
        let message = escape_html(message).replace('\n', "<br>");
        fields.push(format!(
            r#"<div class="field"><div class="label">Message</div><div class="message-box">{}</div></div>"#,
            message
        ));
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <style>
      body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; color: #333; }}
      .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
      .header {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px 10px 0 0; text-align: center; }}
      .content {{ background: #f8f9fa; padding: 30px; border-radius: 0 0 10px 10px; }}
      .field {{ margin-bottom: 20px; padding: 15px; background: white; border-radius: 8px; border-left: 4px solid #667eea; }}
      .label {{ font-weight: 600; color: #667eea; font-size: 12px; text-transform: uppercase; }}
      .message-box {{ background: white; padding: 20px; border-radius: 8px; border: 1px solid #dee2e6; }}
      .footer {{ margin-top: 30px; text-align: center; color: #6c757d; font-size: 14px; }}
    </style>
  </head>
  <body>
    <div class="container">
      <div class="header">
        <h1>New Consultation Request</h1>
        <p>Someone is interested in your services!</p>
      </div>
      <div class="content">
        {}
        <div class="footer"><p>Received on {}</p></div>
      </div>
    </div>
  </body>
</html>"#,
        fields.join("\n        "),
        received_at.format("%A, %B %-d, %Y at %H:%M UTC"),
    );

    BookingNotification {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("New Consultation Request: {}", request.service.trim()),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> BookCallRequest {
        BookCallRequest {
            name: "Ada <script>".to_string(),
            email: "ada@example.com".to_string(),
            service: "Web Development".to_string(),
            message: Some("Line one\nLine & two".to_string()),
            preferred_date: Some("2026-11-02".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn formats_preferred_dates() {
        assert_eq!(format_preferred_date(Some("2026-11-02")), "Monday, November 2, 2026");
        assert_eq!(
            format_preferred_date(Some("2026-11-02T10:30:00Z")),
            "Monday, November 2, 2026"
        );
        assert_eq!(format_preferred_date(None), "Not specified");
        assert_eq!(format_preferred_date(Some("  ")), "Not specified");
        assert_eq!(format_preferred_date(Some("next week")), "next week");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn renders_notification() {
        let received = Utc.with_ymd_and_hms(2026, 10, 19, 9, 5, 0).unwrap();
        let notification = render_notification(&request(), "from@example.com", "to@example.com", received);

        assert_eq!(notification.subject, "New Consultation Request: Web Development");
        assert_eq!(notification.from, "from@example.com");
        assert_eq!(notification.to, "to@example.com");
        assert!(notification.html.contains("Ada &lt;script&gt;"));
        assert!(!notification.html.contains("<script>"));
        assert!(notification.html.contains("Line one<br>Line &amp; two"));
        assert!(notification.html.contains("Monday, November 2, 2026"));
        assert!(notification.html.contains("Received on Monday, October 19, 2026 at 09:05 UTC"));
        assert!(!notification.html.contains("Phone Number"));
        assert!(!notification.html.contains("Company"));
    }
}
