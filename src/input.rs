use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use tracing::info;
use uuid::Uuid;

use crate::error::InputError;
use crate::models::{Application, ApplicationStatus, Scholarship, StudentProfile};

pub fn load_profile(path: &Path) -> Result<StudentProfile, InputError> {
    read_json(path)
}

pub fn load_scholarships(path: &Path) -> Result<Vec<Scholarship>, InputError> {
    let scholarships: Vec<Scholarship> = read_json(path)?;
    info!(count = scholarships.len(), path = %path.display(), "loaded scholarships");
    Ok(scholarships)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an applications export. Rows without an `id` get a fresh one; a
/// date-only deadline means the end of that day in UTC.
pub fn load_applications(path: &Path) -> Result<Vec<Application>, InputError> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CsvRow {
        id: Option<Uuid>,
        scholarship_name: String,
        deadline: String,
        status: ApplicationStatus,
        essay_count: u32,
        essay_complete: u32,
        documents_required: u32,
        documents_uploaded: u32,
        recs_required: u32,
        recs_received: u32,
    }

    let csv_error = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();
    let mut applications = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let row: CsvRow = record.deserialize(Some(&headers)).map_err(csv_error)?;
        let line = record.position().map_or(0, |position| position.line());
        let deadline = parse_deadline(&row.deadline).ok_or_else(|| InputError::Deadline {
            path: path.to_path_buf(),
            line,
            value: row.deadline.clone(),
        })?;

        applications.push(Application {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            scholarship_name: row.scholarship_name,
            deadline,
            status: row.status,
            essay_count: row.essay_count,
            essay_complete: row.essay_complete,
            documents_required: row.documents_required,
            documents_uploaded: row.documents_uploaded,
            recs_required: row.recs_required,
            recs_received: row.recs_received,
        });
    }

    info!(count = applications.len(), path = %path.display(), "loaded applications");
    Ok(applications)
}

pub fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)?;
    Some(date.and_time(end_of_day).and_utc())
}
