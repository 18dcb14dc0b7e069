//! Builds one normalized record per job offer page

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::css_extractor::Queryable;
use super::field::{extract, Extracted};
use super::schema::{Field, FieldDescriptor, PostProcess, JOB_SCHEMA};
use crate::error::{Error, Result};

/// How a comma-separated location collapses to one value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPolicy {
    /// "Warszawa, Mazowieckie" -> "Mazowieckie"
    #[default]
    AfterLastComma,
    /// "Warszawa, Mazowieckie" -> "Warszawa"
    BeforeFirstComma,
    /// Keep the whole value
    Full,
}

impl LocationPolicy {
    pub fn apply(self, raw: &str) -> String {
        let picked = match self {
            LocationPolicy::AfterLastComma => raw.rsplit(',').next().unwrap_or(raw),
            LocationPolicy::BeforeFirstComma => raw.split(',').next().unwrap_or(raw),
            LocationPolicy::Full => raw,
        };
        picked.trim().to_string()
    }
}

/// One output row. Always carries every schema field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    url: String,
    values: Vec<(Field, String)>,
}

impl Record {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecordAssembler {
    schema: &'static [FieldDescriptor],
    location_policy: LocationPolicy,
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(LocationPolicy::default())
    }
}

impl RecordAssembler {
    pub fn new(location_policy: LocationPolicy) -> Self {
        Self {
            schema: JOB_SCHEMA,
            location_policy,
        }
    }

    pub fn with_schema(schema: &'static [FieldDescriptor], location_policy: LocationPolicy) -> Self {
        Self {
            schema,
            location_policy,
        }
    }

    /// Column names in output order, ending with `url`
    pub fn headers(&self) -> Vec<&'static str> {
        self.schema
            .iter()
            .map(|d| d.field.name())
            .chain(std::iter::once("url"))
            .collect()
    }

    /// Extract and normalize every schema field. Fails as a whole: no partial records.
    pub fn assemble<D: Queryable + ?Sized>(&self, doc: &D, source_id: &str) -> Result<Record> {
        let values = self
            .schema
            .iter()
            .map(|desc| -> Result<(Field, String)> {
                let extracted = extract(doc, &desc.locator, desc.fallback)?;
                let value = self.post_process(desc, extracted)?;
                debug!(field = desc.field.name(), %value, "assembled field");
                Ok((desc.field, value))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Record {
            url: source_id.to_string(),
            values,
        })
    }

    fn post_process(&self, desc: &FieldDescriptor, extracted: Extracted) -> Result<String> {
        match (desc.post, extracted) {
            (PostProcess::Keep, Extracted::Single(value)) => Ok(value),
            (PostProcess::Location, Extracted::Single(value)) => {
                Ok(self.location_policy.apply(&value))
            }
            (PostProcess::StripPhrases(phrases), Extracted::Single(value)) => Ok(phrases
                .iter()
                .fold(value, |acc, phrase| acc.replace(*phrase, ""))
                .trim()
                .to_string()),
            (PostProcess::Translate(table), Extracted::Single(value)) => Ok(table.apply(&value)),
            (PostProcess::Join { separator }, Extracted::List(items)) => {
                Ok(join_or_fallback(&items, separator, desc.fallback))
            }
            (PostProcess::TranslateEachAndJoin { table, separator }, Extracted::List(items)) => {
                let translated: Vec<String> = items.iter().map(|item| table.apply(item)).collect();
                Ok(join_or_fallback(&translated, separator, desc.fallback))
            }
            (post, extracted) => Err(Error::SchemaViolation {
                field: desc.field.name(),
                reason: format!("{:?} cannot handle {:?}", post, extracted),
            }),
        }
    }
}

fn join_or_fallback(items: &[String], separator: &str, fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::css_extractor::HtmlDocument;
    use crate::extractors::field::FieldLocator;

    const OFFER: &str = r#"
    <html>
    <body>
        <h1 data-test="text-positionName">Data Engineer</h1>
        <h2 data-test="text-employerName">Acme Corp<a href="/company">About the company</a></h2>
        <ul>
            <li data-test="sections-benefit-workplaces">
                <div data-test="offer-badge-title">Warszawa, Mazowieckie</div>
            </li>
            <li data-test="sections-benefit-contracts">
                <div data-test="offer-badge-title">umowa o pracę</div>
            </li>
            <li data-test="sections-benefit-work-schedule">
                <div data-test="offer-badge-title">pełny etat</div>
            </li>
            <li data-test="sections-benefit-employment-type-name">
                <div data-test="offer-badge-title">specjalista (Mid / Regular)</div>
            </li>
            <li data-test="sections-benefit-work-modes-many">
                <div data-test="offer-badge-title">praca hybrydowa</div>
            </li>
        </ul>
        <div data-test="text-earningAmount">12 000–16 000 zł</div>
        <div data-test="text-earningAmountUnit">zł brutto / mies.</div>
        <div data-test="text-earningAmount">14 000–18 000 zł</div>
        <div data-test="text-earningAmountUnit">zł netto (+ VAT) / mies.</div>
        <div data-test="it-specializations"><ul><li>Big Data / Data Science</li></ul></div>
        <div data-test="section-technologies-optional">
            <ul>
                <li data-test="item-technologies-optional"> SQL </li>
                <li data-test="item-technologies-optional">Docker</li>
            </ul>
        </div>
    </body>
    </html>
    "#;

    struct FailingSource;

    impl Queryable for FailingSource {
        fn select_text(&self, _selector: &str) -> Result<Vec<String>> {
            Err(Error::source_unavailable("https://example.com/offer", "connection reset"))
        }

        fn select_nested_text(&self, selector: &str, _nested: &str) -> Result<Vec<String>> {
            self.select_text(selector)
        }
    }

    #[test]
    fn test_assemble_full_offer() {
        let doc = HtmlDocument::parse(OFFER);
        let record = RecordAssembler::default()
            .assemble(&doc, "https://example.com/offer,1")
            .unwrap();

        assert_eq!(record.url(), "https://example.com/offer,1");
        assert_eq!(record.get(Field::Title), Some("Data Engineer"));
        assert_eq!(record.get(Field::Company), Some("Acme Corp"));
        assert_eq!(record.get(Field::Location), Some("Mazowieckie"));
        assert_eq!(
            record.get(Field::SalaryRanges),
            Some("12 000–16 000 zł; 14 000–18 000 zł")
        );
        assert_eq!(
            record.get(Field::SalaryDescription),
            Some("PLN gross / month; PLN net (+ VAT) / month")
        );
        assert_eq!(record.get(Field::ContractTypes), Some("contract of employment"));
        assert_eq!(record.get(Field::WorkSchedule), Some("full-time"));
        assert_eq!(record.get(Field::EmploymentType), Some("specialist (Mid / Regular)"));
        assert_eq!(record.get(Field::WorkMode), Some("hybrid work"));
        assert_eq!(record.get(Field::Specializations), Some("Big Data / Data Science"));
        assert_eq!(record.get(Field::TechnologiesExpected), Some("No expected technologies"));
        assert_eq!(record.get(Field::TechnologiesOptional), Some("SQL, Docker"));
    }

    #[test]
    fn test_empty_page_has_every_field() {
        let doc = HtmlDocument::parse("<html><body></body></html>");
        let record = RecordAssembler::default().assemble(&doc, "u").unwrap();

        assert_eq!(record.values().count(), JOB_SCHEMA.len());
        assert_eq!(record.get(Field::Title), Some(""));
        assert_eq!(record.get(Field::SalaryRanges), Some(""));
        assert_eq!(record.get(Field::Specializations), Some("No specialization listed"));
        assert_eq!(record.get(Field::TechnologiesOptional), Some("No optional technologies"));
    }

    #[test]
    fn test_company_boilerplate_removed() {
        let doc = HtmlDocument::parse(
            r#"<h2 data-test="text-employerName">About the company Acme Corp</h2>"#,
        );
        let record = RecordAssembler::default().assemble(&doc, "u").unwrap();
        assert_eq!(record.get(Field::Company), Some("Acme Corp"));

        let doc = HtmlDocument::parse(r#"<h2 data-test="text-employerName">Firma SA O firmie</h2>"#);
        let record = RecordAssembler::default().assemble(&doc, "u").unwrap();
        assert_eq!(record.get(Field::Company), Some("Firma SA"));
    }

    #[test]
    fn test_unknown_contract_type_unchanged() {
        let doc = HtmlDocument::parse(
            r#"<li data-test="sections-benefit-contracts"><span data-test="offer-badge-title">freelance</span></li>"#,
        );
        let record = RecordAssembler::default().assemble(&doc, "u").unwrap();
        assert_eq!(record.get(Field::ContractTypes), Some("freelance"));
    }

    #[test]
    fn test_location_policies() {
        assert_eq!(LocationPolicy::AfterLastComma.apply("Warszawa, Mazowieckie"), "Mazowieckie");
        assert_eq!(LocationPolicy::AfterLastComma.apply("Remote, Poland, Europe"), "Europe");
        assert_eq!(LocationPolicy::AfterLastComma.apply("Kraków"), "Kraków");
        assert_eq!(LocationPolicy::BeforeFirstComma.apply("Warszawa, Mazowieckie"), "Warszawa");
        assert_eq!(LocationPolicy::Full.apply("Warszawa, Mazowieckie"), "Warszawa, Mazowieckie");
        assert_eq!(LocationPolicy::AfterLastComma.apply(""), "");
    }

    #[test]
    fn test_location_policy_is_configurable() {
        let doc = HtmlDocument::parse(OFFER);
        let record = RecordAssembler::new(LocationPolicy::BeforeFirstComma)
            .assemble(&doc, "u")
            .unwrap();
        assert_eq!(record.get(Field::Location), Some("Warszawa"));
    }

    #[test]
    fn test_source_failure_propagates() {
        let err = RecordAssembler::default()
            .assemble(&FailingSource, "https://example.com/offer")
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { .. }));
    }

    #[test]
    fn test_schema_violation_is_reported() {
        const BROKEN: &[FieldDescriptor] = &[FieldDescriptor {
            field: Field::SalaryRanges,
            locator: FieldLocator::single("div.salary"),
            fallback: "",
            post: PostProcess::Join { separator: "; " },
        }];

        let doc = HtmlDocument::parse(r#"<div class="salary">1</div>"#);
        let err = RecordAssembler::with_schema(BROKEN, LocationPolicy::default())
            .assemble(&doc, "u")
            .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { field: "salary_ranges", .. }));
    }

    #[test]
    fn test_headers_follow_schema() {
        let headers = RecordAssembler::default().headers();
        assert_eq!(headers.first(), Some(&"title"));
        assert_eq!(headers.last(), Some(&"url"));
        assert_eq!(headers.len(), JOB_SCHEMA.len() + 1);
    }
}
