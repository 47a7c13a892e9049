//! CSV rendering for the console's application export.

use chrono::{DateTime, Utc};

use super::reporting::views::ApplicationListEntry;

pub const EXPORT_HEADERS: [&str; 10] = [
    "Name",
    "Email",
    "Phone",
    "Country",
    "Job",
    "Applied Date",
    "Status",
    "Source",
    "LinkedIn",
    "Portfolio",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to render csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Io(#[from] std::io::Error),
    #[error("exported csv was not valid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Renders the export rows (expected newest first) as CSV text with a
/// header record. Quoting is delegated to the `csv` writer.
pub fn applications_csv(entries: &[ApplicationListEntry]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for entry in entries {
        let application = &entry.application;
        writer.write_record([
            application.full_name.as_str(),
            application.email.as_str(),
            application.phone.as_str(),
            application.country.as_str(),
            entry.job_title.as_str(),
            &application.created_at.format("%Y-%m-%d").to_string(),
            application.status.wire_name(),
            application.source.wire_name(),
            application.linkedin_url.as_deref().unwrap_or(""),
            application.portfolio_url.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// `applications-YYYY-MM-DD.csv`, dated from the injected clock.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("applications-{}.csv", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::super::applications::domain::{
        Application, ApplicationId, ApplicationSource, ApplicationStatus,
    };
    use super::super::jobs::domain::JobId;
    use super::*;
    use chrono::TimeZone;

    fn entry(name: &str, job_title: &str) -> ApplicationListEntry {
        ApplicationListEntry {
            application: Application {
                id: ApplicationId("app-000001".to_string()),
                job_id: JobId("job-000001".to_string()),
                full_name: name.to_string(),
                email: "priya@example.com".to_string(),
                phone: "+44 7700 900123".to_string(),
                country: "United Kingdom".to_string(),
                resume_url: "https://files.example.com/resume.pdf".to_string(),
                linkedin_url: Some("https://linkedin.com/in/priya".to_string()),
                portfolio_url: None,
                why_interested: "Flexible work".to_string(),
                relevant_experience: "Labeling".to_string(),
                source: ApplicationSource::Linkedin,
                status: ApplicationStatus::New,
                created_at: Utc.with_ymd_and_hms(2026, 3, 12, 18, 30, 0).unwrap(),
            },
            job_title: job_title.to_string(),
            job_slug: "ai-data-annotator".to_string(),
        }
    }

    #[test]
    fn renders_header_and_rows() {
        let csv = applications_csv(&[entry("Priya Patel", "AI Data Annotator")])
            .expect("csv renders");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Email,Phone,Country,Job,Applied Date,Status,Source,LinkedIn,Portfolio")
        );
        let row = lines.next().expect("data row");
        assert!(row.starts_with("Priya Patel,priya@example.com"));
        assert!(row.contains("2026-03-12"));
        assert!(row.ends_with("https://linkedin.com/in/priya,"));
    }

    #[test]
    fn status_and_source_columns_carry_wire_values() {
        let mut shortlisted = entry("Priya Patel", "Annotator");
        shortlisted.application.status = ApplicationStatus::Shortlisted;
        let csv = applications_csv(&[shortlisted]).expect("csv renders");
        let row = csv.lines().nth(1).expect("data row");
        assert!(row.contains("SHORTLISTED,LINKEDIN"));
        assert!(!row.contains("Shortlisted,LinkedIn"));
    }

    #[test]
    fn quotes_fields_containing_commas() {
        let csv = applications_csv(&[entry("Patel, Priya", "Annotator")]).expect("csv renders");
        assert!(csv.contains("\"Patel, Priya\""));
    }

    #[test]
    fn filename_uses_utc_date() {
        let now = Utc.with_ymd_and_hms(2026, 3, 12, 23, 59, 0).unwrap();
        assert_eq!(export_filename(now), "applications-2026-03-12.csv");
    }
}
