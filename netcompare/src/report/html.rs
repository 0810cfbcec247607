use minijinja::{context, Environment};

use super::ComparisonReport;
use crate::core::NetCompareError;

const HTML_TEMPLATE: &str = include_str!("report.html.jinja");

/// Render the report with the embedded template. Values are HTML-escaped.
pub fn render_html(report: &ComparisonReport) -> Result<String, NetCompareError> {
    let mut env = Environment::new();
    env.add_template("report.html", HTML_TEMPLATE)?;

    let template = env.get_template("report.html")?;
    let html = template.render(context! {
        report,
        version => env!("CARGO_PKG_VERSION"),
    })?;

    Ok(html)
}
