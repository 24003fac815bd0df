use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

mod db;
mod demo;
mod models;
mod report;
mod scoring;
mod trend;
mod triage;

use crate::models::{MoodCheckIn, PriorityEntry, PriorityTier, StudentRecord};

#[derive(Parser)]
#[command(name = "mindcare-triage")]
#[command(about = "Mood check-in triage queue for student counsellors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load the demo students and check-ins into the database
    Seed,
    /// Import mood check-ins from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print the prioritized student queue for counsellors
    Queue {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show mood trend and insight for one student
    Trend {
        #[arg(long)]
        email: String,
        #[arg(long)]
        json: bool,
    },
    /// Write a markdown triage report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Run the queue and trend pass over the built-in demo snapshot
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = connect().await?;
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} check-ins from {}.", csv.display());
        }
        Commands::Queue { limit, json } => {
            let pool = connect().await?;
            let students = db::fetch_students(&pool).await?;
            let checkins = db::fetch_checkins(&pool).await?;
            let queue = triage::rank_students(&students, &checkins);
            print_queue(&queue, limit, json)?;
        }
        Commands::Trend { email, json } => {
            let pool = connect().await?;
            let student = db::find_student_by_email(&pool, &email)
                .await?
                .with_context(|| format!("no student with email {email}"))?;
            let history = db::fetch_checkins_for(&pool, student.id).await?;
            print_trend(&student, &history, json)?;
        }
        Commands::Report { out } => {
            let pool = connect().await?;
            let students = db::fetch_students(&pool).await?;
            let checkins = db::fetch_checkins(&pool).await?;
            let report = report::build_report(&students, &checkins);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Demo => {
            let (students, checkins) = demo::snapshot()?;
            let queue = triage::rank_students(&students, &checkins);
            print_queue(&queue, queue.len(), false)?;
            for entry in &queue {
                println!();
                print_trend(&entry.student, &entry.history, false)?;
            }
        }
    }

    Ok(())
}

async fn connect() -> anyhow::Result<MySqlPool> {
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set to a MySQL instance")?;

    MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to MySQL")
}

#[derive(serde::Serialize)]
struct QueueRow<'a> {
    student_id: Uuid,
    full_name: &'a str,
    email: &'a str,
    priority: PriorityTier,
    reason: &'a str,
}

fn print_queue(queue: &[PriorityEntry], limit: usize, json: bool) -> anyhow::Result<()> {
    if queue.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    if json {
        let rows: Vec<QueueRow> = queue
            .iter()
            .take(limit)
            .map(|entry| QueueRow {
                student_id: entry.student.id,
                full_name: &entry.student.full_name,
                email: &entry.student.email,
                priority: entry.tier,
                reason: &entry.reason,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Student priority queue:");
    for entry in queue.iter().take(limit) {
        println!(
            "- [{}] {} ({}) {}",
            entry.tier.as_str(),
            entry.student.full_name,
            entry.student.email,
            entry.reason
        );
    }
    Ok(())
}

fn print_trend(student: &StudentRecord, history: &[MoodCheckIn], json: bool) -> anyhow::Result<()> {
    let assessment = trend::analyze_trend(history);
    let insight = trend::generate_insight(history);
    let series = report::daily_series(history, scoring::TREND_WINDOW_DAYS);

    if json {
        let view = serde_json::json!({
            "student_id": student.id,
            "trend": assessment,
            "insight": insight,
            "daily_series": series,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    match assessment.percent_change {
        Some(pct) => println!(
            "{}: {} ({pct}% change)",
            student.full_name,
            assessment.direction.as_str()
        ),
        None => println!(
            "{}: {} (no data)",
            student.full_name,
            assessment.direction.as_str()
        ),
    }
    println!(
        "  {} (confidence {})",
        insight.text,
        insight.confidence.as_str()
    );
    let scores: Vec<String> = series.iter().map(|day| day.score.to_string()).collect();
    println!("  last 7 days: {}", scores.join(" "));
    Ok(())
}
