//! Prediction result section: alert, probability chart, recommendations

use std::fmt::Write;

use dropout_core::{constants, PredictionResult, Recommendation};

use super::escape_html;

/// Colored alert with label and confidence
pub fn render_alert(prediction: &PredictionResult) -> String {
    format!(
        r#"<div class="alert {class}">{headline}</div>"#,
        class = prediction.severity.css_class(),
        headline = escape_html(&prediction.headline()),
    )
}

/// Bar chart of the class probabilities in Low/Medium/High order
pub fn render_chart(prediction: &PredictionResult) -> String {
    let mut html = String::from(
        r#"<div class="chart"><h3>Risk Probability</h3><div class="bars">"#,
    );

    for (label, probability) in prediction.chart_bars() {
        let height = (probability.clamp(0.0, 1.0) * 100.0).round();
        let _ = write!(
            html,
            r#"<div class="bar-col"><span class="bar-value">{probability:.3}</span><div class="bar" style="height:{height}%"></div><span class="bar-label">{label}</span></div>"#,
        );
    }

    html.push_str("</div></div>");
    html
}

pub fn render_recommendation(recommendation: &Recommendation) -> String {
    match recommendation {
        Recommendation::Generated(text) => format!(
            r#"<h2>🤖 AI Recommendations</h2><div class="recommendation">{}</div>"#,
            escape_html(text)
        ),
        Recommendation::Disabled => format!(
            r#"<div class="alert alert-note">ℹ️ {}</div>"#,
            constants::RECOMMENDATIONS_DISABLED_MESSAGE
        ),
    }
}

/// Full result section
pub fn render_result(prediction: &PredictionResult, recommendation: &Recommendation) -> String {
    format!(
        "<section class=\"result\"><h2>🎯 Prediction Result</h2>\n{}\n{}\n{}\n</section>",
        render_alert(prediction),
        render_chart(prediction),
        render_recommendation(recommendation),
    )
}
