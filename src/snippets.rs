use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

// Salary-like figures carry at least one thousands group ("12,000",
// "1,234,567"); bare small integers in prose are noise.
static SALARY_FIGURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}(?:,\d{3})+").expect("salary pattern should be valid"));

/// Min/max/average of the salary figures one search source mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStats {
    pub source: String,
    pub min: i64,
    pub max: i64,
    pub avg: i64,
}

impl SourceStats {
    /// One line of "live market data" context, in the wording the benchmark
    /// prompt expects.
    pub fn context_line(&self) -> String {
        format!(
            "{}: שכר {}–{} ₪, ממוצע {} ₪",
            self.source, self.min, self.max, self.avg
        )
    }
}

/// Collect salary figures across all `snippets` of one source and reduce them
/// to per-source statistics. No figures at all → `None`.
pub fn scan_snippets<S: AsRef<str>>(source: &str, snippets: &[S]) -> Option<SourceStats> {
    let mut min = i64::MAX;
    let mut max = i64::MIN;
    let mut sum: i64 = 0;
    let mut count: i64 = 0;

    for snippet in snippets {
        for figure in SALARY_FIGURE_RE.find_iter(snippet.as_ref()) {
            let value: i64 = match figure.as_str().replace(',', "").parse() {
                Ok(v) => v,
                Err(_) => continue,
            };
            min = min.min(value);
            max = max.max(value);
            sum += value;
            count += 1;
        }
    }

    if count == 0 {
        debug!(source, "no salary figures in snippets");
        return None;
    }
    Some(SourceStats {
        source: source.to_string(),
        min,
        max,
        avg: sum / count,
    })
}

/// Display name of a `site:` search filter: "site:alljobs.co.il" → "Alljobs".
pub fn source_display_name(site_filter: &str) -> String {
    let host = site_filter.rsplit(':').next().unwrap_or(site_filter);
    let name = host.split('.').next().unwrap_or(host);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figures_reduce_to_min_max_avg() {
        let snippets = ["שכר ממוצע 12,000 ₪ לחודש", "בכירים מרוויחים עד 15,000"];
        let stats = scan_snippets("Alljobs", &snippets).unwrap();
        assert_eq!(stats.min, 12000);
        assert_eq!(stats.max, 15000);
        assert_eq!(stats.avg, 13500);
    }

    #[test]
    fn no_figures_yields_none() {
        assert_eq!(scan_snippets("Globes", &["אין נתוני שכר זמינים"]), None);
        assert_eq!(scan_snippets::<&str>("Globes", &[]), None);
    }

    #[test]
    fn small_integers_are_not_salaries() {
        // "5 שנות ניסיון" must not register as a figure.
        assert_eq!(scan_snippets("Drushim", &["דרושים 5 אנשי מכירות"]), None);
    }

    #[test]
    fn millions_are_read_whole() {
        let stats = scan_snippets("Bizportal", &["עלות שנתית 1,234,567 ₪"]).unwrap();
        assert_eq!(stats.min, 1234567);
    }

    #[test]
    fn display_name_from_site_filter() {
        assert_eq!(source_display_name("site:alljobs.co.il"), "Alljobs");
        assert_eq!(source_display_name("drushim.co.il"), "Drushim");
    }

    #[test]
    fn context_line_mentions_all_three_figures() {
        let stats = scan_snippets("Alljobs", &["12,000 עד 15,000"]).unwrap();
        let line = stats.context_line();
        assert!(line.contains("Alljobs"));
        assert!(line.contains("12000"));
        assert!(line.contains("13500"));
    }
}
