use crate::infra::marketplace_state;
use clap::Args;
use talent_ai::config::OperatorCredential;
use talent_ai::error::AppError;
use talent_ai::marketplace::{
    applications_csv, export_filename, ApplicationStatus, Clock, IntakeSubmission, JobDraft,
    JobStatus, LifecycleError, OperatorId, OperatorIdentity, PayType,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Application cap for the demo posting
    #[arg(long, default_value_t = 2)]
    pub(crate) cap: u32,
    /// Skip the CSV export portion of the demo output
    #[arg(long)]
    pub(crate) skip_export: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let roster = vec![OperatorCredential::development_default()];
    let state = marketplace_state(&roster);
    let operator = OperatorIdentity {
        id: OperatorId(roster[0].operator_id.clone()),
        name: roster[0].display_name.clone(),
    };

    println!("Talent marketplace lifecycle demo");

    println!("\nPosting lifecycle");
    let draft = state.jobs.create(Some(&operator), demo_draft(args.cap))?;
    println!(
        "- Drafted '{}' as {} (slug {})",
        draft.title, draft.id.0, draft.slug
    );

    let mut publish = demo_draft(args.cap);
    publish.status = JobStatus::Published;
    let published = state.jobs.update(Some(&operator), &draft.id, publish)?;
    match published.published_at {
        Some(stamp) => println!("- Published at {}", stamp.to_rfc3339()),
        None => println!("- Published (timestamp missing)"),
    }
    println!(
        "- Pay: {}-{} ({}), {}",
        published.pay_min,
        published.pay_max,
        published.pay_type.label(),
        published.time_commitment
    );

    println!("\nSeeker intake (cap {})", args.cap);
    let applicants = [
        ("Priya Patel", "priya@example.com"),
        ("Ben Okafor", "ben@example.com"),
        ("Mina Chen", "mina@example.com"),
    ];
    let mut admitted = Vec::new();
    for (name, email) in applicants {
        match state.intake.admit(demo_submission(&draft.id.0, name, email)) {
            Ok(application) => {
                println!("- Admitted {} as {}", name, application.id.0);
                admitted.push(application);
            }
            Err(LifecycleError::Capacity(_)) => {
                println!("- Refused {} (position full)", name);
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("\nReview trail");
    if let Some(first) = admitted.first() {
        state
            .review
            .set_status(Some(&operator), &first.id, ApplicationStatus::Reviewing)?;
        state
            .review
            .set_status(Some(&operator), &first.id, ApplicationStatus::Shortlisted)?;
        state
            .review
            .append_note(Some(&operator), &first.id, "strong take-home exercise")?;
        let detail = state.reports.application_detail(&first.id)?;
        println!(
            "- {} (source {}) is now {} with {} note(s)",
            detail.application.full_name,
            detail.application.source.label(),
            detail.application.status.label(),
            detail.notes.len()
        );
        match serde_json::to_string_pretty(&detail) {
            Ok(json) => println!("  Console detail payload:\n{}", json),
            Err(err) => println!("  Console detail payload unavailable: {}", err),
        }
    }

    let dashboard = state.reports.dashboard()?;
    println!("\nDashboard");
    println!(
        "- Jobs: {} open / {} draft / {} closed",
        dashboard.job_stats.open_jobs,
        dashboard.job_stats.draft_jobs,
        dashboard.job_stats.closed_jobs
    );
    println!(
        "- Applications: {} total | {} pending review | {} shortlisted | {} in the last 7 days",
        dashboard.application_stats.total_applications,
        dashboard.application_stats.pending_review,
        dashboard.application_stats.shortlisted,
        dashboard.application_stats.applications_last_7_days
    );
    for recent in &dashboard.recent_applications {
        println!(
            "  - {} -> {} ({})",
            recent.full_name, recent.job_title, recent.status_label
        );
    }

    if args.skip_export {
        return Ok(());
    }

    let rows = state.reports.applications_export()?;
    let csv = applications_csv(&rows)?;
    println!("\nCSV export ({})", export_filename(state.clock.now()));
    for line in csv.lines() {
        println!("  {}", line);
    }

    Ok(())
}

fn demo_draft(cap: u32) -> JobDraft {
    JobDraft {
        title: "AI Data Annotator".to_string(),
        status: JobStatus::Draft,
        pay_min: 15,
        pay_max: 25,
        pay_type: Some(PayType::Hourly),
        time_commitment: "10-20 hours/week".to_string(),
        remote_worldwide: true,
        short_description: "Label and review training data for production models.".to_string(),
        full_description: "Annotate text, image and audio datasets against detailed guidelines."
            .to_string(),
        responsibilities: "Annotate assigned batches and report guideline gaps.".to_string(),
        requirements: "Strong written English and careful attention to detail.".to_string(),
        skill_tags: vec!["annotation".to_string()],
        max_applications: Some(cap),
        ..JobDraft::default()
    }
}

fn demo_submission(job_id: &str, name: &str, email: &str) -> IntakeSubmission {
    IntakeSubmission {
        job_id: job_id.to_string(),
        full_name: name.to_string(),
        email: email.to_string(),
        phone: "+1 515 555 0100".to_string(),
        country: "United States".to_string(),
        resume_url: "https://files.example.com/resume.pdf".to_string(),
        why_interested: "Flexible remote work alongside studies.".to_string(),
        relevant_experience: "Two years of part-time labeling work.".to_string(),
        ..IntakeSubmission::default()
    }
}
