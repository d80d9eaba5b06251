//! Output formatting for normalized items (table, JSON, markdown, CSV).

use crate::amazon::NormalizedItem;
use crate::config::OutputFormat;

/// Formats items for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats multiple items.
    pub fn format_items(&self, items: &[NormalizedItem]) -> String {
        if items.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No items found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_items(items),
            OutputFormat::Table => self.table_items(items),
            OutputFormat::Markdown => self.markdown_items(items),
            OutputFormat::Csv => self.csv_items(items),
        }
    }

    // JSON formatting

    fn json_items(&self, items: &[NormalizedItem]) -> String {
        serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_items(&self, items: &[NormalizedItem]) -> String {
        let asin_width = 10;
        let price_width = 18;
        let prime_width = 5;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<asin_width$}  {:<price_width$}  {:<prime_width$}  {}",
            "ASIN", "Price", "Prime", "Title"
        ));
        lines.push(format!(
            "{:-<asin_width$}  {:-<price_width$}  {:-<prime_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for item in items {
            let prime_str = if item.is_prime { "Yes" } else { "No" };

            lines.push(format!(
                "{:<asin_width$}  {:>price_width$}  {:<prime_width$}  {}",
                Self::asin(item),
                item.price,
                prime_str,
                Self::truncate(&item.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} items", items.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_items(&self, items: &[NormalizedItem]) -> String {
        let mut lines = Vec::new();

        lines.push("| ASIN | Price | Prime | Title |".to_string());
        lines.push("|------|-------|-------|-------|".to_string());

        for item in items {
            let prime_str = if item.is_prime { "✓" } else { "" };
            let title = Self::truncate(&item.title, 40);

            // Link only when there is a real URL to link to
            let title_cell = if item.product_url.starts_with("http") {
                format!("[{}]({})", title, item.affiliate_link)
            } else {
                title
            };

            lines.push(format!(
                "| {} | {} | {} | {} |",
                Self::asin(item),
                item.price,
                prime_str,
                title_cell
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} items found*", items.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "asin,title,price,prime,image,url,affiliate_link".to_string()
    }

    fn csv_items(&self, items: &[NormalizedItem]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for item in items {
            lines.push(format!(
                "{},{},{},{},{},{},{}",
                Self::asin(item),
                Self::csv_escape(&item.title),
                Self::csv_escape(&item.price),
                item.is_prime,
                Self::csv_escape(&item.image),
                Self::csv_escape(&item.product_url),
                Self::csv_escape(&item.affiliate_link)
            ));
        }

        lines.join("\n")
    }

    fn asin(item: &NormalizedItem) -> &str {
        item.raw_item.get("ASIN").and_then(|v| v.as_str()).unwrap_or("-")
    }

    fn truncate(s: &str, width: usize) -> String {
        if s.chars().count() > width {
            let head: String = s.chars().take(width - 3).collect();
            format!("{}...", head)
        } else {
            s.to_string()
        }
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amazon::normalizer::normalize;
    use serde_json::json;

    fn make_item() -> NormalizedItem {
        normalize(
            json!({
                "ASIN": "B0C1234567",
                "DetailPageURL": "https://www.amazon.com.br/dp/B0C1234567",
                "ItemInfo": {"Title": {"DisplayValue": "Echo Dot, 5a geração"}},
                "Images": {"Primary": {"HighRes": {"URL": "https://m.media-amazon.com/images/I/hi.jpg"}}},
                "Offers": {"Listings": [{"Price": {"DisplayAmount": "R$ 379,05"}, "IsPrimeEligible": true}]}
            }),
            "tag-20",
        )
    }

    fn make_empty_item() -> NormalizedItem {
        normalize(json!({}), "tag-20")
    }

    #[test]
    fn test_json_items() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_items(&[make_item()]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["price"], "R$ 379,05");
        assert_eq!(parsed[0]["isPrime"], true);
        assert_eq!(parsed[0]["rawItem"]["ASIN"], "B0C1234567");
    }

    #[test]
    fn test_empty_outputs() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_items(&[]), "[]");
        assert_eq!(
            Formatter::new(OutputFormat::Csv).format_items(&[]),
            "asin,title,price,prime,image,url,affiliate_link"
        );
        assert_eq!(Formatter::new(OutputFormat::Table).format_items(&[]), "No items found.");
        assert_eq!(Formatter::new(OutputFormat::Markdown).format_items(&[]), "No items found.");
    }

    #[test]
    fn test_table_items() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_items(&[make_item(), make_empty_item()]);

        assert!(output.contains("ASIN"));
        assert!(output.contains("B0C1234567"));
        assert!(output.contains("R$ 379,05"));
        assert!(output.contains("Yes"));
        assert!(output.contains("title unavailable"));
        assert!(output.contains("Total: 2 items"));
    }

    #[test]
    fn test_table_truncates_long_title() {
        let mut item = make_item();
        item.title = "Kindle Paperwhite 16 GB com tela de 7 polegadas e iluminação ajustável".to_string();

        let output = Formatter::new(OutputFormat::Table).format_items(&[item]);
        assert!(output.contains("..."));
        assert!(!output.contains("iluminação ajustável"));
    }

    #[test]
    fn test_markdown_items() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let output = formatter.format_items(&[make_item(), make_empty_item()]);

        assert!(output.contains("| ASIN | Price | Prime | Title |"));
        assert!(output.contains("(https://www.amazon.com.br/dp/B0C1234567?tag=tag-20)"));
        assert!(output.contains("| - | price unavailable |  | title unavailable |"));
        assert!(output.contains("*2 items found*"));
    }

    #[test]
    fn test_csv_items() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_items(&[make_item()]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("B0C1234567,\"Echo Dot, 5a geração\",\"R$ 379,05\",true,"));
        assert!(lines[1].ends_with("https://www.amazon.com.br/dp/B0C1234567?tag=tag-20"));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("plain"), "plain");
        assert_eq!(Formatter::csv_escape("a,b"), "\"a,b\"");
        assert_eq!(Formatter::csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
