//! Skill models, cross-document deduplication and JSON output

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::llm::SkillExtractor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologySkill {
    /// Concrete technology name, e.g. "Python"
    pub name: String,
    /// e.g. "Programming Language", "Database"
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftSkill {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub technologies: Vec<TechnologySkill>,
    pub soft_skills: Vec<SoftSkill>,
    pub document_title: String,
}

fn dedup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Collects skills across documents. The first skill seen under a
/// case-insensitive name wins; order of first appearance is kept.
#[derive(Debug, Default)]
pub struct SkillDeduplicator {
    technologies: Vec<TechnologySkill>,
    soft_skills: Vec<SoftSkill>,
    seen_technologies: HashSet<String>,
    seen_soft_skills: HashSet<String>,
    document_titles: Vec<String>,
}

impl SkillDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, skills: ExtractedSkills) {
        if !skills.document_title.is_empty() {
            self.document_titles.push(skills.document_title);
        }

        for tech in skills.technologies {
            let key = dedup_key(&tech.name);
            if !key.is_empty() && self.seen_technologies.insert(key) {
                self.technologies.push(tech);
            }
        }

        for skill in skills.soft_skills {
            let key = dedup_key(&skill.name);
            if !key.is_empty() && self.seen_soft_skills.insert(key) {
                self.soft_skills.push(skill);
            }
        }
    }

    pub fn document_count(&self) -> usize {
        self.document_titles.len()
    }

    pub fn finish(self) -> ExtractedSkills {
        ExtractedSkills {
            document_title: format!("Combined skills from {} documents", self.document_titles.len()),
            technologies: self.technologies,
            soft_skills: self.soft_skills,
        }
    }
}

/// Run `extractor` over every markdown file in `dir` and merge the results.
///
/// A file whose extraction fails is logged and skipped.
pub fn extract_directory<E: SkillExtractor + ?Sized>(
    extractor: &E,
    dir: &Path,
) -> Result<ExtractedSkills> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();

    if files.is_empty() {
        warn!(dir = %dir.display(), "no markdown files found");
        return Ok(ExtractedSkills {
            document_title: "No documents found".to_string(),
            ..ExtractedSkills::default()
        });
    }
    info!(count = files.len(), "extracting skills from markdown files");

    let mut dedup = SkillDeduplicator::new();
    for file in &files {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extracted = std::fs::read_to_string(file)
            .map_err(Into::into)
            .and_then(|content| extractor.extract_skills(&content));

        match extracted {
            Ok(mut skills) => {
                if skills.document_title.trim().is_empty() {
                    skills.document_title = stem;
                }
                info!(
                    file = %file.display(),
                    technologies = skills.technologies.len(),
                    soft_skills = skills.soft_skills.len(),
                    "extracted skills"
                );
                dedup.add(skills);
            }
            Err(e) => error!(file = %file.display(), error = %e, "failed to extract skills"),
        }
    }

    let merged = dedup.finish();
    info!(
        technologies = merged.technologies.len(),
        soft_skills = merged.soft_skills.len(),
        "deduplicated skills"
    );
    Ok(merged)
}

/// Pretty JSON, UTF-8, non-ASCII kept as-is
pub fn save_json(skills: &ExtractedSkills, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(skills)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "skills saved");
    Ok(())
}
