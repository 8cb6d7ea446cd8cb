//! HTML templates embedded in the binary and rendered with minijinja.

use crate::errors::Result;
use minijinja::{Environment, Value};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("auth/login.html", include_str!("../../templates/auth/login.html")),
    (
        "auth/register.html",
        include_str!("../../templates/auth/register.html"),
    ),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("events/list.html", include_str!("../../templates/events/list.html")),
    ("events/form.html", include_str!("../../templates/events/form.html")),
    (
        "events/detail.html",
        include_str!("../../templates/events/detail.html"),
    ),
    ("guests/list.html", include_str!("../../templates/guests/list.html")),
    ("guests/form.html", include_str!("../../templates/guests/form.html")),
    (
        "bookings/list.html",
        include_str!("../../templates/bookings/list.html"),
    ),
    (
        "bookings/form.html",
        include_str!("../../templates/bookings/form.html"),
    ),
    ("error.html", include_str!("../../templates/error.html")),
];

/// Compiled page templates.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compiles every embedded template.
    ///
    /// # Errors
    /// Returns `Error::Template` when a template has a syntax error.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("money", money);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    /// Returns `Error::Template` for unknown templates or rendering failures.
    pub fn render(&self, name: &str, ctx: Value) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }
}

/// Formats an amount with thousands separators and two decimals.
///
/// `{{ 1234567.891 | money }}` renders as `1,234,567.89`, and `-1500` as `-1,500.00`.
fn money(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        let templates = Templates::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(templates.env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_money_filter() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(999.5), "999.50");
        assert_eq!(money(300_000.0), "300,000.00");
        assert_eq!(money(1_234_567.891), "1,234,567.89");
        assert_eq!(money(-1500.0), "-1,500.00");
    }

    #[test]
    fn test_money_filter_in_template() {
        let mut env = Environment::new();
        env.add_filter("money", money);
        let out = env
            .render_str("{{ amount | money }}", context! { amount => 1_234_567.891 })
            .unwrap();
        assert_eq!(out, "1,234,567.89");
    }

    #[test]
    fn test_render_escapes_user_input() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render(
                "error.html",
                context! { status => 404, title => "Not Found", message => "<script>" },
            )
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
