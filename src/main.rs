use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use skillgap::config::Config;
use skillgap::fetch::HttpSource;
use skillgap::llm::OpenAiSkillExtractor;
use skillgap::{logging, outcomes, scrape, skills};

#[derive(Parser)]
#[command(name = "skillgap", version, about = "Job offer scraper and syllabus skill extractor")]
struct Cli {
    /// TOML config file; defaults are used for anything it leaves out
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape job offers into CSV
    Scrape {
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        max_pages: Option<u32>,
        /// Ignore robots.txt
        #[arg(long)]
        no_robots: bool,
    },
    /// Filter learning outcomes out of syllabus PDFs into markdown
    Outcomes {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract and deduplicate skills from the filtered markdown
    Skills {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let mut config = Config::load_or_default(cli.config.as_deref())
        .with_context(|| format!("loading config {:?}", cli.config))?;

    match cli.command {
        Command::Scrape {
            out,
            max_pages,
            no_robots,
        } => {
            let scrape_config = &mut config.scrape;
            if let Some(out) = out {
                scrape_config.output = out;
            }
            if max_pages.is_some() {
                scrape_config.max_pages = max_pages;
            }
            if no_robots {
                scrape_config.respect_robots = false;
            }

            let source = HttpSource::new(&scrape_config.user_agent, scrape_config.timeout_secs);
            let summary = scrape::run(&source, scrape_config).context("scrape failed")?;
            println!(
                "Wrote {} offers to {} ({} skipped, {} blocked by robots.txt)",
                summary.records.len(),
                scrape_config.output.display(),
                summary.skipped.len(),
                summary.blocked.len()
            );
        }
        Command::Outcomes { input, output } => {
            let syllabus = &config.syllabus;
            let input = input.unwrap_or_else(|| syllabus.input_dir.clone());
            let output = output.unwrap_or_else(|| syllabus.markdown_dir.clone());

            let summary = outcomes::convert_directory(&input, &output)
                .with_context(|| format!("converting syllabi in {}", input.display()))?;
            info!(
                written = summary.written.len(),
                failed = summary.failed.len(),
                "syllabus conversion finished"
            );
        }
        Command::Skills { input, out, api_key } => {
            let syllabus = &config.syllabus;
            let input = input.unwrap_or_else(|| syllabus.markdown_dir.clone());
            let out = out.unwrap_or_else(|| syllabus.skills_output.clone());

            if !input.is_dir() {
                anyhow::bail!(
                    "markdown directory {} not found, run `skillgap outcomes` first",
                    input.display()
                );
            }

            let extractor = OpenAiSkillExtractor::new(&api_key, syllabus)?;
            let merged = skills::extract_directory(&extractor, &input)?;
            skills::save_json(&merged, &out)?;

            println!("Unique technologies: {}", merged.technologies.len());
            println!("Unique soft skills: {}", merged.soft_skills.len());
            for tech in merged.technologies.iter().take(5) {
                println!("  - {} ({})", tech.name, tech.category);
            }
            if merged.technologies.len() > 5 {
                println!("  ... and {} more", merged.technologies.len() - 5);
            }
            println!("Results saved to: {}", out.display());
        }
    }

    Ok(())
}
