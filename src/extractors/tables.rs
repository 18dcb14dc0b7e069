//! Polish to English vocabulary used on job offer pages
//!
//! Where one key is a prefix of another, the longer key is listed first.

use super::translate::TranslationTable;

pub const CONTRACT_TYPES: TranslationTable = TranslationTable::new(
    "contract_types",
    &[
        ("umowa o pracę tymczasową", "temporary employment contract"),
        ("umowa o pracę", "contract of employment"),
        ("umowa o dzieło", "contract for specific work"),
        ("umowa zlecenie", "contract of mandate"),
        ("kontrakt B2B", "B2B contract"),
        ("umowa na zastępstwo", "substitution agreement"),
        ("umowa agencyjna", "agency agreement"),
        ("umowa o staż / praktyki", "internship / apprenticeship contract"),
    ],
);

pub const WORK_SCHEDULES: TranslationTable = TranslationTable::new(
    "work_schedule",
    &[
        ("pełny etat", "full-time"),
        ("część etatu", "part time"),
        ("dodatkowa / tymczasowa", "additional / temporary"),
    ],
);

pub const EMPLOYMENT_TYPES: TranslationTable = TranslationTable::new(
    "employment_type",
    &[
        ("starszy specjalista (Senior)", "senior specialist (Senior)"),
        ("młodszy specjalista (Junior)", "junior specialist (Junior)"),
        ("specjalista (Mid / Regular)", "specialist (Mid / Regular)"),
        ("praktykant / stażysta", "trainee"),
        ("asystent", "assistant"),
        ("kierownik / koordynator", "team manager"),
        ("menedżer", "manager"),
        ("dyrektor", "director"),
        ("prezes", "president"),
        ("ekspert", "expert"),
        ("pracownik fizyczny", "blue-collar worker"),
    ],
);

pub const WORK_MODES: TranslationTable = TranslationTable::new(
    "work_mode",
    &[
        ("praca stacjonarna", "full office work"),
        ("praca hybrydowa", "hybrid work"),
        ("praca zdalna", "home office work"),
        ("praca mobilna", "mobile work"),
    ],
);

/// Applied to each salary description item
pub const SALARY: TranslationTable = TranslationTable::new(
    "salary",
    &[
        ("brutto", "gross"),
        ("netto (+ VAT)", "net (+ VAT)"),
        ("netto", "net"),
        ("/ mies.", "/ month"),
        ("/ godz.", "/ hour"),
        ("zł", "PLN"),
    ],
);

/// Phrases removed from the employer name heading
pub const COMPANY_BOILERPLATE: &[&str] = &["About the company", "O firmie"];
