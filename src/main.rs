use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use scholarship_match::config::AppConfig;
use scholarship_match::eligibility::{compare_eligibility, EligibilitySummary};
use scholarship_match::{at_risk, evaluation, input, report, telemetry};

#[derive(Parser)]
#[command(name = "scholarship-match")]
#[command(about = "Scholarship matching, prioritization and deadline tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank scholarships for a student profile
    Match {
        #[arg(long)]
        profile: PathBuf,
        #[arg(long)]
        scholarships: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
        /// Print the ranked list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare a profile against one scholarship's eligibility criteria
    Eligibility {
        #[arg(long)]
        profile: PathBuf,
        #[arg(long)]
        scholarships: PathBuf,
        /// Scholarship name or id
        #[arg(long)]
        scholarship: String,
        #[arg(long)]
        json: bool,
    },
    /// Flag in-progress applications approaching their deadline
    AtRisk {
        #[arg(long)]
        applications: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        profile: PathBuf,
        #[arg(long)]
        scholarships: PathBuf,
        #[arg(long)]
        applications: Option<PathBuf>,
        #[arg(long)]
        student: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.log_level).context("failed to initialise logging")?;

    match cli.command {
        Commands::Match {
            profile,
            scholarships,
            limit,
            json,
        } => {
            let profile = input::load_profile(&profile)?;
            let scholarships = input::load_scholarships(&scholarships)?;
            let ranked = evaluation::rank_scholarships(&profile, &scholarships);
            let limit = limit.unwrap_or(config.rank_limit);

            if json {
                let top: Vec<_> = ranked.iter().take(limit).collect();
                println!("{}", serde_json::to_string_pretty(&top)?);
                return Ok(());
            }

            if ranked.is_empty() {
                println!("No scholarships to rank.");
                return Ok(());
            }

            println!("Top scholarships by priority:");
            for entry in ranked.iter().take(limit) {
                println!(
                    "- {} [{}] match {:.1}, success {:.1}%, strategic value {:.2}",
                    entry.name,
                    entry.score.priority_tier.as_str(),
                    entry.score.overall_match_score,
                    entry.score.success_probability,
                    entry.score.strategic_value
                );
            }
        }
        Commands::Eligibility {
            profile,
            scholarships,
            scholarship,
            json,
        } => {
            let profile = input::load_profile(&profile)?;
            let scholarships = input::load_scholarships(&scholarships)?;
            let target = scholarships
                .iter()
                .find(|candidate| {
                    candidate.id.to_string() == scholarship
                        || candidate.name.eq_ignore_ascii_case(&scholarship)
                })
                .with_context(|| format!("no scholarship named or identified by '{scholarship}'"))?;

            let items = compare_eligibility(&profile, &target.criteria);
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
                return Ok(());
            }

            let summary = EligibilitySummary::from_items(&items);
            println!(
                "{}: {} of {} requirements met",
                target.name,
                summary.met,
                summary.total()
            );
            for item in items.iter() {
                println!(
                    "- {} / {}: {:?} (you: {})",
                    item.category.as_str(),
                    item.requirement,
                    item.status,
                    item.student_value
                );
            }
        }
        Commands::AtRisk { applications, json } => {
            let applications = input::load_applications(&applications)?;
            let flagged = at_risk::detect_at_risk_now(&applications);

            if json {
                println!("{}", serde_json::to_string_pretty(&flagged)?);
                return Ok(());
            }

            if flagged.is_empty() {
                println!("No applications at risk.");
                return Ok(());
            }

            for flag in flagged.iter() {
                println!(
                    "- {} [{}] {} days left, {:.0}% complete ({})",
                    flag.scholarship_name,
                    flag.risk_level.as_str(),
                    flag.days_until_deadline,
                    flag.progress,
                    flag.rule.as_str()
                );
                for step in flag.recovery_plan.iter() {
                    println!("    {}. {}", step.priority, step.action);
                }
            }
        }
        Commands::Report {
            profile,
            scholarships,
            applications,
            student,
            limit,
            out,
        } => {
            let profile = input::load_profile(&profile)?;
            let scholarships = input::load_scholarships(&scholarships)?;
            let ranked = evaluation::rank_scholarships(&profile, &scholarships);
            let now = Utc::now();
            let flagged = match applications {
                Some(path) => at_risk::detect_at_risk(&input::load_applications(&path)?, now),
                None => Vec::new(),
            };

            let report = report::build_report(
                student.as_deref(),
                now.date_naive(),
                &profile,
                &scholarships,
                &ranked,
                &flagged,
                limit.unwrap_or(config.rank_limit),
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "report written");
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
