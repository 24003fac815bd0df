use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use crate::models::{Mood, MoodCheckIn, StudentRecord};

pub async fn init_db(pool: &MySqlPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &MySqlPool) -> anyhow::Result<()> {
    let (students, checkins) = crate::demo::snapshot()?;

    for student in &students {
        sqlx::query(
            r#"
            INSERT INTO students (id, full_name, email)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE full_name = VALUES(full_name)
            "#,
        )
        .bind(student.id.to_string())
        .bind(&student.full_name)
        .bind(&student.email)
        .execute(pool)
        .await?;
    }

    for (idx, checkin) in checkins.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT IGNORE INTO mood_checkins (id, student_id, mood, recorded_at, source_key)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(checkin.student_id.to_string())
        .bind(checkin.mood.as_str())
        .bind(checkin.recorded_at)
        .bind(format!("seed-{idx:03}"))
        .execute(pool)
        .await?;
    }

    tracing::info!(
        students = students.len(),
        checkins = checkins.len(),
        "seed data inserted"
    );
    Ok(())
}

/// Students in a fixed order; the queue relies on this order to break ties
/// between equal tiers.
pub async fn fetch_students(pool: &MySqlPool) -> anyhow::Result<Vec<StudentRecord>> {
    let rows = sqlx::query("SELECT id, full_name, email FROM students ORDER BY created_at, email")
        .fetch_all(pool)
        .await?;

    let mut students = Vec::new();
    for row in rows {
        students.push(StudentRecord {
            id: parse_id(row.get("id"))?,
            full_name: row.get("full_name"),
            email: row.get("email"),
        });
    }

    Ok(students)
}

pub async fn find_student_by_email(
    pool: &MySqlPool,
    email: &str,
) -> anyhow::Result<Option<StudentRecord>> {
    let row = sqlx::query("SELECT id, full_name, email FROM students WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(found) => Ok(Some(StudentRecord {
            id: parse_id(found.get("id"))?,
            full_name: found.get("full_name"),
            email: found.get("email"),
        })),
        None => Ok(None),
    }
}

pub async fn fetch_checkins(pool: &MySqlPool) -> anyhow::Result<Vec<MoodCheckIn>> {
    let rows = sqlx::query(
        "SELECT student_id, mood, recorded_at FROM mood_checkins ORDER BY recorded_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(checkin_from_row).collect()
}

pub async fn fetch_checkins_for(
    pool: &MySqlPool,
    student_id: Uuid,
) -> anyhow::Result<Vec<MoodCheckIn>> {
    let rows = sqlx::query(
        "SELECT student_id, mood, recorded_at FROM mood_checkins \
         WHERE student_id = ? ORDER BY recorded_at DESC",
    )
    .bind(student_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(checkin_from_row).collect()
}

pub async fn import_csv(pool: &MySqlPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        full_name: String,
        email: String,
        mood: String,
        recorded_at: DateTime<Utc>,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;

        sqlx::query(
            r#"
            INSERT INTO students (id, full_name, email)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE full_name = VALUES(full_name)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&row.full_name)
        .bind(&row.email)
        .execute(pool)
        .await?;

        let student_id: String = sqlx::query("SELECT id FROM students WHERE email = ?")
            .bind(&row.email)
            .fetch_one(pool)
            .await?
            .get("id");

        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        // The raw label is stored as-is; unrecognized moods degrade to a
        // zero score at read time instead of blocking the import.
        let result = sqlx::query(
            r#"
            INSERT IGNORE INTO mood_checkins (id, student_id, mood, recorded_at, source_key)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&student_id)
        .bind(row.mood.trim())
        .bind(row.recorded_at)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    tracing::info!(inserted, "csv import finished");
    Ok(inserted)
}

fn checkin_from_row(row: sqlx::mysql::MySqlRow) -> anyhow::Result<MoodCheckIn> {
    let mood: String = row.get("mood");
    Ok(MoodCheckIn {
        student_id: parse_id(row.get("student_id"))?,
        mood: Mood::from_label(&mood),
        recorded_at: row.get("recorded_at"),
    })
}

fn parse_id(raw: String) -> anyhow::Result<Uuid> {
    Uuid::parse_str(&raw).with_context(|| format!("malformed id in storage: {raw}"))
}
