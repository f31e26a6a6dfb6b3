//! Page layout: header, sidebar form, main panel, footer

use dropout_core::{constants, StudentProfile};

use super::{escape_html, form};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f7f7fb; color: #222; }
.header { text-align: center; padding: 20px; background: #6c63ff; color: white; border-radius: 10px; margin: 16px; }
.layout { display: flex; gap: 24px; margin: 0 16px; }
.sidebar { flex: 0 0 300px; background: white; padding: 16px; border-radius: 10px; display: flex; flex-direction: column; gap: 4px; }
.sidebar input, .sidebar select { width: 100%; margin-bottom: 8px; }
.sidebar button { margin-top: 12px; padding: 10px; font-size: 1rem; border: 0; border-radius: 6px; background: #6c63ff; color: white; cursor: pointer; }
.main { flex: 1; }
.alert { padding: 12px 16px; border-radius: 8px; margin: 8px 0; font-weight: 600; }
.alert-info { background: #e6f4ea; color: #1e6b34; }
.alert-warning { background: #fff4e0; color: #8a5a00; }
.alert-error { background: #fde8e8; color: #9b1c1c; }
.alert-note { background: #e8f0fe; color: #1a4b8c; font-weight: normal; }
.chart .bars { display: flex; align-items: flex-end; gap: 24px; height: 240px; padding: 8px; background: white; border-radius: 10px; }
.bar-col { flex: 1; display: flex; flex-direction: column; justify-content: flex-end; align-items: center; height: 100%; }
.bar { width: 60%; background: #6c63ff; border-radius: 4px 4px 0 0; }
.recommendation { white-space: pre-wrap; background: white; padding: 16px; border-radius: 10px; }
.footer { text-align: center; color: gray; margin: 24px; }
"#;

fn shell(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>🎓 Student Dropout Risk Predictor</title>
<style>{STYLE}</style>
</head>
<body>
<div class="header">
<h1>🎓 {name}</h1>
<p>AI-powered early warning &amp; recommendation system</p>
</div>
{body}
<hr>
<div class="footer">Built with ❤️ using Rust, Axum, ONNX Runtime &amp; Gemini AI · v{version}</div>
</body>
</html>
"#,
        name = constants::APP_NAME,
        version = constants::APP_VERSION,
    )
}

/// Form plus an optional pre-rendered result section
pub fn render_page(profile: &StudentProfile, result: Option<&str>) -> String {
    let body = format!(
        "<div class=\"layout\">\n{form}<main class=\"main\">\n{result}\n</main>\n</div>",
        form = form::render_form(profile),
        result = result.unwrap_or(""),
    );
    shell(&body)
}

pub fn render_error(status: u16, message: &str) -> String {
    let body = format!(
        r#"<main class="main" style="margin: 0 16px"><div class="alert alert-error">❌ {status}: {}</div><p><a href="/">Back to form</a></p></main>"#,
        escape_html(message),
    );
    shell(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_chrome() {
        let html = render_page(&StudentProfile::default(), None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Student Dropout Risk Prediction System"));
        assert!(html.contains("AI-powered early warning &amp; recommendation system"));
        assert!(html.contains(r#"action="/predict""#));
        assert!(!html.contains("Prediction Result"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error(400, "Out of range: <age>");
        assert!(html.contains("400: Out of range: &lt;age&gt;"));
    }
}
