//! Job listing scrape: enumerate offers, assemble records, write CSV

use tracing::{info, warn};

use crate::config::ScrapeConfig;
use crate::csv_sink;
use crate::error::Result;
use crate::extractors::{Record, RecordAssembler};
use crate::fetch::PageSource;
use crate::pagination;
use crate::robots::RobotsGuard;

#[derive(Debug, Default)]
pub struct ScrapeSummary {
    /// Assembled records in processing order
    pub records: Vec<Record>,
    /// Offers whose fetch or assembly failed
    pub skipped: Vec<String>,
    /// Offers disallowed by robots.txt
    pub blocked: Vec<String>,
}

/// Fetch and assemble each URL in order. Per-offer failures are logged and skipped.
pub fn scrape_offers<S: PageSource + ?Sized>(
    source: &S,
    assembler: &RecordAssembler,
    mut robots: Option<&mut RobotsGuard>,
    urls: &[String],
) -> ScrapeSummary {
    let mut summary = ScrapeSummary::default();

    for (i, url) in urls.iter().enumerate() {
        if let Some(guard) = robots.as_deref_mut() {
            if !guard.allowed(source, url) {
                warn!(%url, "disallowed by robots.txt");
                summary.blocked.push(url.clone());
                continue;
            }
        }

        match source.fetch(url).and_then(|doc| assembler.assemble(&doc, url)) {
            Ok(record) => {
                info!(n = i + 1, total = urls.len(), %url, "assembled offer");
                summary.records.push(record);
            }
            Err(e) => {
                warn!(%url, error = %e, "skipping offer");
                summary.skipped.push(url.clone());
            }
        }
    }

    summary
}

/// Full scrape run as configured, writing the CSV to `config.output`
pub fn run<S: PageSource + ?Sized>(source: &S, config: &ScrapeConfig) -> Result<ScrapeSummary> {
    config.validate()?;

    let mut robots = config
        .respect_robots
        .then(|| RobotsGuard::new(&config.user_agent));
    let urls = pagination::enumerate_offers(source, config, robots.as_mut())?;
    let assembler = RecordAssembler::new(config.location_policy);

    let summary = scrape_offers(source, &assembler, robots.as_mut(), &urls);

    csv_sink::write_records_to_path(
        &config.output,
        &assembler.headers(),
        &summary.records,
        config.delimiter,
    )?;

    info!(
        written = summary.records.len(),
        skipped = summary.skipped.len(),
        blocked = summary.blocked.len(),
        output = %config.output.display(),
        "scrape finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Field;
    use crate::fetch::testing::StaticSource;

    const LISTING: &str = r#"
        <span data-test="top-pagination-max-page-number">1</span>
        <a data-test="link-offer" href="/o/1">1</a>
        <a data-test="link-offer" href="/o/2">2</a>
        <a data-test="link-offer" href="/private/3">3</a>
        <a data-test="link-offer" href="/o/4">4</a>
    "#;

    fn offer(title: &str) -> String {
        format!(r#"<h1 data-test="text-positionName">{}</h1>"#, title)
    }

    fn source() -> StaticSource {
        StaticSource::default()
            .with_page("https://jobs.test/praca?pn=1", LISTING)
            .with_page("https://jobs.test/robots.txt", "User-agent: *\nDisallow: /private/\n")
            .with_page("https://jobs.test/o/1", &offer("First"))
            .with_page("https://jobs.test/private/3", &offer("Hidden"))
            .with_page("https://jobs.test/o/4", &offer("Fourth"))
    }

    #[test]
    fn test_run_skips_failures_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScrapeConfig {
            listing_url: "https://jobs.test/praca?pn={page}".to_string(),
            output: dir.path().join("jobs.csv"),
            ..ScrapeConfig::default()
        };

        let summary = run(&source(), &config).unwrap();

        let titles: Vec<_> = summary
            .records
            .iter()
            .map(|r| r.get(Field::Title).unwrap())
            .collect();
        assert_eq!(titles, vec!["First", "Fourth"]);
        assert_eq!(summary.skipped, vec!["https://jobs.test/o/2"]);
        assert_eq!(summary.blocked, vec!["https://jobs.test/private/3"]);

        let csv = std::fs::read_to_string(&config.output).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_without_robots_guard() {
        let urls = vec!["https://jobs.test/private/3".to_string()];
        let summary = scrape_offers(&source(), &RecordAssembler::default(), None, &urls);
        assert_eq!(summary.records.len(), 1);
        assert!(summary.blocked.is_empty());
    }
}
