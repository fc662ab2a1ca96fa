use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::{path::Path, str::FromStr};

use super::traits::{NewCourse, Storage, StorageRead, StorageTx, StorageWrite};
use crate::types::{Course, Difficulty, EventType, Interaction, NewReview, RatingSummary, Review};

const DB_SCHEMA_VERSION: i64 = 1;

const COURSE_COLUMNS: &str = r#"
    c.course_id, c.title, c.provider, c.description, c.tags, c.min_cgpa,
    c.difficulty, c.duration_weeks, c.url,
    COALESCE(AVG(r.rating), 0.0) AS avg_rating,
    COUNT(r.review_id) AS rating_count
"#;

#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

pub struct SqliteTx {
    conn: Connection,
}

impl StorageTx for SqliteTx {
    fn commit(self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn map_course_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Course> {
    let course_id: i64 = row.get(0)?;
    let tags: Option<String> = row.get(4)?;
    let difficulty_str: String = row.get(6)?;
    let difficulty = Difficulty::from_str(&difficulty_str)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(err)))?;
    let duration_int: Option<i64> = row.get(7)?;
    let duration_weeks: u32 = duration_int.unwrap_or(0).try_into().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(7, Type::Integer, Box::new(err))
    })?;
    let count_int: i64 = row.get(10)?;
    let rating_count: u32 = count_int.try_into().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(10, Type::Integer, Box::new(err))
    })?;

    Ok(Course {
        course_id: course_id.to_string(),
        title: row.get(1)?,
        provider: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        tags: tags.as_deref().map(Course::parse_tags).unwrap_or_default(),
        min_cgpa: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        difficulty,
        duration_weeks,
        url: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        avg_rating: row.get(9)?,
        rating_count,
    })
}

fn map_review_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Review> {
    let review_id: i64 = row.get(0)?;
    let course_id: i64 = row.get(1)?;
    let rating_int: i64 = row.get(3)?;
    let rating: u8 = rating_int.try_into().map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(err))
    })?;
    let is_senior: i64 = row.get(7)?;
    let created_at: String = row.get(8)?;

    Ok(Review {
        review_id: review_id.to_string(),
        course_id: course_id.to_string(),
        reviewer_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        rating,
        pros: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        cons: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        comment: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        is_senior: is_senior != 0,
        created_at: parse_ts(8, &created_at)?,
    })
}

fn map_interaction_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Interaction> {
    let event_str: String = row.get(2)?;
    let event_type = EventType::from_str(&event_str)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(err)))?;
    let created_at: String = row.get(4)?;

    Ok(Interaction {
        user_id: row.get(0)?,
        course_id: row.get(1)?,
        event_type,
        details: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        created_at: parse_ts(4, &created_at)?,
    })
}

fn db_list_courses(conn: &Connection) -> rusqlite::Result<Vec<Course>> {
    let sql = format!(
        r#"
        SELECT {COURSE_COLUMNS}
        FROM courses c
        LEFT JOIN reviews r ON r.course_id = c.course_id
        GROUP BY c.course_id
        ORDER BY c.created_at DESC, c.course_id DESC
        "#
    );
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt
        .query_map([], map_course_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(mapped)
}

fn db_load_course(conn: &Connection, course_id: i64) -> rusqlite::Result<Option<Course>> {
    let sql = format!(
        r#"
        SELECT {COURSE_COLUMNS}
        FROM courses c
        LEFT JOIN reviews r ON r.course_id = c.course_id
        WHERE c.course_id = ?1
        GROUP BY c.course_id
        "#
    );
    conn.query_row(&sql, params![course_id], map_course_row)
        .optional()
}

fn db_list_reviews(conn: &Connection, course_id: i64) -> rusqlite::Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT review_id, course_id, reviewer_name, rating, pros, cons, comment, is_senior, created_at
        FROM reviews
        WHERE course_id = ?1
        ORDER BY created_at DESC, review_id DESC
        "#,
    )?;
    let rows = stmt
        .query_map(params![course_id], map_review_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_rating_summary(conn: &Connection, course_id: i64) -> rusqlite::Result<RatingSummary> {
    conn.query_row(
        "SELECT COALESCE(AVG(rating), 0.0), COUNT(*) FROM reviews WHERE course_id = ?1",
        params![course_id],
        |row| {
            let avg_rating: f64 = row.get(0)?;
            let count: i64 = row.get(1)?;
            let rating_count = count.try_into().map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(1, Type::Integer, Box::new(err))
            })?;
            Ok(RatingSummary {
                avg_rating,
                rating_count,
            })
        },
    )
}

fn db_list_interactions(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Interaction>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT user_id, course_id, event_type, details, created_at
        FROM interactions
        WHERE user_id = ?1
        ORDER BY created_at, id
        "#,
    )?;
    let rows = stmt
        .query_map(params![user_id], map_interaction_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_insert_course(
    conn: &Connection,
    course: &NewCourse,
    created_at: DateTime<Utc>,
) -> rusqlite::Result<i64> {
    conn.execute(
        r#"
        INSERT INTO courses (
            title, provider, description, tags, min_cgpa,
            difficulty, duration_weeks, url, source, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            course.title,
            course.provider,
            course.description,
            course.tags.join(","),
            course.min_cgpa,
            course.difficulty.as_str(),
            course.duration_weeks as i64,
            course.url,
            course.source,
            format_ts(created_at)
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn db_mark_elective(conn: &Connection, course_id: i64) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO electives (course_id) VALUES (?1)",
        params![course_id],
    )?;
    Ok(())
}

fn db_insert_review(
    conn: &Connection,
    review: &NewReview,
    created_at: DateTime<Utc>,
) -> rusqlite::Result<i64> {
    conn.execute(
        r#"
        INSERT INTO reviews (
            course_id, user_id, reviewer_name, rating, pros, cons, comment, is_senior, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            review.course_id,
            review.user_id,
            review.reviewer_name,
            review.rating as i64,
            review.pros,
            review.cons,
            review.comment,
            review.is_senior as i64,
            format_ts(created_at)
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn db_record_interaction(conn: &Connection, interaction: &Interaction) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO interactions (user_id, course_id, event_type, details, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            interaction.user_id,
            interaction.course_id,
            interaction.event_type.as_str(),
            interaction.details,
            format_ts(interaction.created_at)
        ],
    )?;
    Ok(())
}

fn db_clear_all(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM electives;
        DELETE FROM reviews;
        DELETE FROM interactions;
        DELETE FROM courses;
        "#,
    )
}

impl StorageRead for SqliteTx {
    fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(db_list_courses(&self.conn)?)
    }

    fn load_course(&self, course_id: i64) -> Result<Option<Course>> {
        Ok(db_load_course(&self.conn, course_id)?)
    }

    fn list_reviews(&self, course_id: i64) -> Result<Vec<Review>> {
        Ok(db_list_reviews(&self.conn, course_id)?)
    }

    fn rating_summary(&self, course_id: i64) -> Result<RatingSummary> {
        Ok(db_rating_summary(&self.conn, course_id)?)
    }

    fn list_interactions(&self, user_id: &str) -> Result<Vec<Interaction>> {
        Ok(db_list_interactions(&self.conn, user_id)?)
    }
}

impl StorageWrite for SqliteTx {
    fn insert_course(&self, course: &NewCourse, created_at: DateTime<Utc>) -> Result<i64> {
        Ok(db_insert_course(&self.conn, course, created_at)?)
    }

    fn mark_elective(&self, course_id: i64) -> Result<()> {
        Ok(db_mark_elective(&self.conn, course_id)?)
    }

    fn insert_review(&self, review: &NewReview, created_at: DateTime<Utc>) -> Result<i64> {
        Ok(db_insert_review(&self.conn, review, created_at)?)
    }

    fn record_interaction(&self, interaction: &Interaction) -> Result<()> {
        Ok(db_record_interaction(&self.conn, interaction)?)
    }

    fn clear_all(&self) -> Result<()> {
        Ok(db_clear_all(&self.conn)?)
    }
}

impl StorageRead for SqliteStorage {
    fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.with_conn(db_list_courses)?)
    }

    fn load_course(&self, course_id: i64) -> Result<Option<Course>> {
        Ok(self.with_conn(|conn| db_load_course(conn, course_id))?)
    }

    fn list_reviews(&self, course_id: i64) -> Result<Vec<Review>> {
        Ok(self.with_conn(|conn| db_list_reviews(conn, course_id))?)
    }

    fn rating_summary(&self, course_id: i64) -> Result<RatingSummary> {
        Ok(self.with_conn(|conn| db_rating_summary(conn, course_id))?)
    }

    fn list_interactions(&self, user_id: &str) -> Result<Vec<Interaction>> {
        Ok(self.with_conn(|conn| db_list_interactions(conn, user_id))?)
    }
}

impl Storage for SqliteStorage {
    type Tx = SqliteTx;

    fn begin_tx(&self) -> Result<Self::Tx> {
        let conn = self.open()?;
        conn.execute("BEGIN IMMEDIATE", [])?;
        Ok(SqliteTx { conn })
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if !Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;
        Self::migrate(&conn)?;
        Ok(conn)
    }

    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.open()?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE courses (
                course_id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                provider TEXT,
                description TEXT,
                tags TEXT,
                min_cgpa REAL DEFAULT 0.0,
                difficulty TEXT NOT NULL,
                duration_weeks INTEGER,
                url TEXT,
                source TEXT,
                created_at TEXT NOT NULL
            );
            CREATE TABLE electives (
                elective_id INTEGER PRIMARY KEY AUTOINCREMENT,
                course_id INTEGER NOT NULL REFERENCES courses(course_id)
            );
            CREATE TABLE reviews (
                review_id INTEGER PRIMARY KEY AUTOINCREMENT,
                course_id INTEGER NOT NULL REFERENCES courses(course_id),
                user_id TEXT,
                reviewer_name TEXT,
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                pros TEXT,
                cons TEXT,
                comment TEXT,
                is_senior INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            CREATE TABLE interactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                course_id TEXT NOT NULL,
                event_type TEXT NOT NULL,
                details TEXT,
                created_at TEXT NOT NULL
            );
            CREATE INDEX reviews_course_idx ON reviews(course_id);
            CREATE INDEX interactions_user_idx ON interactions(user_id);
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}
