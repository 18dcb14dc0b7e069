//! The job offer schema: one descriptor per output column
//!
//! Adding a column means adding a descriptor here; the assembler has no
//! per-field code.

use serde::{Deserialize, Serialize};

use super::field::FieldLocator;
use super::tables::{
    COMPANY_BOILERPLATE, CONTRACT_TYPES, EMPLOYMENT_TYPES, SALARY, WORK_MODES, WORK_SCHEDULES,
};
use super::translate::TranslationTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Company,
    Location,
    SalaryRanges,
    SalaryDescription,
    ContractTypes,
    WorkSchedule,
    EmploymentType,
    WorkMode,
    Specializations,
    TechnologiesExpected,
    TechnologiesOptional,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Company => "company",
            Field::Location => "location",
            Field::SalaryRanges => "salary_ranges",
            Field::SalaryDescription => "salary_description",
            Field::ContractTypes => "contract_types",
            Field::WorkSchedule => "work_schedule",
            Field::EmploymentType => "employment_type",
            Field::WorkMode => "work_mode",
            Field::Specializations => "specializations",
            Field::TechnologiesExpected => "technologies_expected",
            Field::TechnologiesOptional => "technologies_optional",
        }
    }
}

/// Technology sections share markup and differ only by their kind suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechSection {
    Expected,
    Optional,
}

impl TechSection {
    const fn section_selector(self) -> &'static str {
        match self {
            TechSection::Expected => r#"div[data-test="section-technologies-expected"]"#,
            TechSection::Optional => r#"div[data-test="section-technologies-optional"]"#,
        }
    }

    const fn item_selector(self) -> &'static str {
        match self {
            TechSection::Expected => r#"[data-test="item-technologies-expected"]"#,
            TechSection::Optional => r#"[data-test="item-technologies-optional"]"#,
        }
    }

    pub const fn locator(self) -> FieldLocator {
        FieldLocator::list(self.section_selector()).within(self.item_selector())
    }
}

/// What happens to a field after extraction
#[derive(Debug, Clone, Copy)]
pub enum PostProcess {
    /// Keep the trimmed value
    Keep,
    /// Apply the assembler's location policy
    Location,
    /// Remove boilerplate phrases, then trim
    StripPhrases(&'static [&'static str]),
    Translate(TranslationTable),
    /// Join list items; an empty list renders the fallback
    Join { separator: &'static str },
    /// Translate each list item, then join
    TranslateEachAndJoin {
        table: TranslationTable,
        separator: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub field: Field,
    pub locator: FieldLocator,
    pub fallback: &'static str,
    pub post: PostProcess,
}

const BADGE: &str = r#"[data-test="offer-badge-title"]"#;

pub const JOB_SCHEMA: &[FieldDescriptor] = &[
    FieldDescriptor {
        field: Field::Title,
        locator: FieldLocator::single(r#"h1[data-test="text-positionName"]"#),
        fallback: "",
        post: PostProcess::Keep,
    },
    FieldDescriptor {
        field: Field::Company,
        locator: FieldLocator::single(r#"h2[data-test="text-employerName"]"#),
        fallback: "",
        post: PostProcess::StripPhrases(COMPANY_BOILERPLATE),
    },
    FieldDescriptor {
        field: Field::Location,
        locator: FieldLocator::single(r#"li[data-test="sections-benefit-workplaces"]"#)
            .within(BADGE),
        fallback: "",
        post: PostProcess::Location,
    },
    FieldDescriptor {
        field: Field::SalaryRanges,
        locator: FieldLocator::list(r#"div[data-test="text-earningAmount"]"#),
        fallback: "",
        post: PostProcess::Join { separator: "; " },
    },
    FieldDescriptor {
        field: Field::SalaryDescription,
        locator: FieldLocator::list(r#"div[data-test="text-earningAmountUnit"]"#),
        fallback: "",
        post: PostProcess::TranslateEachAndJoin {
            table: SALARY,
            separator: "; ",
        },
    },
    FieldDescriptor {
        field: Field::ContractTypes,
        locator: FieldLocator::single(r#"li[data-test="sections-benefit-contracts"]"#)
            .within(BADGE),
        fallback: "",
        post: PostProcess::Translate(CONTRACT_TYPES),
    },
    FieldDescriptor {
        field: Field::WorkSchedule,
        locator: FieldLocator::single(r#"li[data-test="sections-benefit-work-schedule"]"#)
            .within(BADGE),
        fallback: "",
        post: PostProcess::Translate(WORK_SCHEDULES),
    },
    FieldDescriptor {
        field: Field::EmploymentType,
        locator: FieldLocator::single(r#"li[data-test="sections-benefit-employment-type-name"]"#)
            .within(BADGE),
        fallback: "",
        post: PostProcess::Translate(EMPLOYMENT_TYPES),
    },
    FieldDescriptor {
        field: Field::WorkMode,
        locator: FieldLocator::single(r#"li[data-test^="sections-benefit-work-modes"]"#)
            .within(BADGE),
        fallback: "",
        post: PostProcess::Translate(WORK_MODES),
    },
    FieldDescriptor {
        field: Field::Specializations,
        locator: FieldLocator::list(r#"div[data-test="it-specializations"]"#).within("li"),
        fallback: "No specialization listed",
        post: PostProcess::Join { separator: ", " },
    },
    FieldDescriptor {
        field: Field::TechnologiesExpected,
        locator: TechSection::Expected.locator(),
        fallback: "No expected technologies",
        post: PostProcess::Join { separator: ", " },
    },
    FieldDescriptor {
        field: Field::TechnologiesOptional,
        locator: TechSection::Optional.locator(),
        fallback: "No optional technologies",
        post: PostProcess::Join { separator: ", " },
    },
];
