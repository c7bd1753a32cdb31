// Output formatting and styling

use colored::Colorize;
use vitrine_search::{AuditTrail, CatalogItem};

/// Output styling configuration
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl OutputStyle {
    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    /// Format info message
    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    /// Format header
    pub fn header(&self, title: &str) -> String {
        if self.use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.use_colors {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// One numbered result line
    pub fn item(&self, index: usize, item: &CatalogItem) -> String {
        let traits: Vec<&str> = [&item.basecolour, &item.articletype, &item.gender]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect();
        let id = format!("#{}", item.product_id);
        let id = if self.use_colors {
            id.cyan().to_string()
        } else {
            id
        };

        if traits.is_empty() {
            format!("{:>3}. {} {}", index, id, item.name)
        } else {
            format!(
                "{:>3}. {} {} {}",
                index,
                id,
                item.name,
                self.dim(&format!("({})", traits.join(", ")))
            )
        }
    }

    /// Every audit entry as `label: attr=value, ...`
    pub fn audit_trail(&self, trail: &AuditTrail) -> String {
        trail
            .entries()
            .iter()
            .map(|entry| {
                let filters = if entry.filters.is_empty() {
                    "(no filters)".to_string()
                } else {
                    entry
                        .filters
                        .iter()
                        .map(|(attribute, value)| format!("{attribute}={value}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!("  {}: {}", self.header(&entry.label), filters)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Print formatted output
pub fn print_success(msg: &str) {
    let style = OutputStyle::default();
    println!("{}", style.success(msg));
}

pub fn print_error(msg: &str) {
    let style = OutputStyle::default();
    eprintln!("{}", style.error(msg));
}

pub fn print_warning(msg: &str) {
    let style = OutputStyle::default();
    println!("{}", style.warning(msg));
}

pub fn print_info(msg: &str) {
    let style = OutputStyle::default();
    println!("{}", style.info(msg));
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_search::{Attribute, FilterSet};

    #[test]
    fn test_output_style_without_colors() {
        let style = OutputStyle { use_colors: false };
        assert_eq!(style.success("test"), "✓ test");
        assert_eq!(style.error("test"), "✗ test");
        assert_eq!(style.warning("test"), "⚠ test");
        assert_eq!(style.info("test"), "ℹ test");
    }

    #[test]
    fn test_item_line() {
        let style = OutputStyle { use_colors: false };
        let mut item = CatalogItem::new(42, "Trail Gloves");
        assert_eq!(style.item(1, &item), "  1. #42 Trail Gloves");

        item.basecolour = Some("Olive".to_string());
        item.gender = Some("Unisex".to_string());
        assert_eq!(style.item(2, &item), "  2. #42 Trail Gloves (Olive, Unisex)");
    }

    #[test]
    fn test_audit_trail_lines() {
        let style = OutputStyle { use_colors: false };
        let mut trail = AuditTrail::new();
        trail.record(
            "attempt 1",
            &FilterSet::new()
                .with(Attribute::BaseColour, "Green")
                .with(Attribute::SubCategory, "Gloves"),
        );
        trail.record("fallback", &FilterSet::new());

        assert_eq!(
            style.audit_trail(&trail),
            "  attempt 1: subcategory=Gloves, basecolour=Green\n  fallback: (no filters)"
        );
    }
}
