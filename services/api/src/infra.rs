use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_ai::config::OperatorCredential;
use talent_ai::marketplace::{
    AuthGateway, JobDraft, JobStatus, LifecycleError, MarketplaceState, MemoryStore,
    OperatorDirectory, OperatorId, OperatorIdentity, PayType, SystemClock,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Roster-backed gateway for console requests. Tokens come from
/// `APP_OPERATOR_TOKENS`; lookups are exact-match against the parsed roster.
pub(crate) struct StaticTokenAuth {
    by_token: HashMap<String, OperatorIdentity>,
    names: HashMap<String, String>,
}

impl StaticTokenAuth {
    pub(crate) fn from_roster(roster: &[OperatorCredential]) -> Self {
        let mut by_token = HashMap::new();
        let mut names = HashMap::new();
        for credential in roster {
            by_token.insert(
                credential.token.clone(),
                OperatorIdentity {
                    id: OperatorId(credential.operator_id.clone()),
                    name: credential.display_name.clone(),
                },
            );
            names.insert(
                credential.operator_id.clone(),
                credential.display_name.clone(),
            );
        }
        Self { by_token, names }
    }
}

impl AuthGateway for StaticTokenAuth {
    fn authenticate(&self, token: &str) -> Option<OperatorIdentity> {
        self.by_token.get(token).cloned()
    }
}

impl OperatorDirectory for StaticTokenAuth {
    fn display_name(&self, id: &OperatorId) -> Option<String> {
        self.names.get(&id.0).cloned()
    }
}

pub(crate) fn marketplace_state(
    roster: &[OperatorCredential],
) -> MarketplaceState<MemoryStore, SystemClock> {
    let gateway = Arc::new(StaticTokenAuth::from_roster(roster));
    MarketplaceState::new(
        Arc::new(MemoryStore::default()),
        Arc::new(SystemClock),
        gateway.clone(),
        gateway,
    )
}

/// Seeds one published posting and one draft so a fresh instance has data
/// to browse. The seeding operator is the first roster entry.
pub(crate) fn seed_sample_jobs(
    state: &MarketplaceState<MemoryStore, SystemClock>,
    roster: &[OperatorCredential],
) -> Result<(), LifecycleError> {
    let operator = match roster.first() {
        Some(credential) => OperatorIdentity {
            id: OperatorId(credential.operator_id.clone()),
            name: credential.display_name.clone(),
        },
        None => return Ok(()),
    };

    state.jobs.create(
        Some(&operator),
        JobDraft {
            title: "AI Data Annotator".to_string(),
            status: JobStatus::Published,
            pay_min: 15,
            pay_max: 25,
            pay_type: Some(PayType::Hourly),
            time_commitment: "10-20 hours/week".to_string(),
            remote_worldwide: true,
            short_description: "Label and review training data for production models."
                .to_string(),
            full_description: "Annotate text, image and audio datasets against detailed \
                               guidelines, flag ambiguous items, and feed quality reports \
                               back to the research team."
                .to_string(),
            responsibilities: "Annotate assigned batches, review peer labels, report \
                               guideline gaps."
                .to_string(),
            requirements: "Strong written English and careful attention to detail."
                .to_string(),
            nice_to_have: Some("Prior labeling platform experience.".to_string()),
            skill_tags: vec!["annotation".to_string(), "quality-review".to_string()],
            tools: vec!["Label Studio".to_string()],
            ..JobDraft::default()
        },
    )?;

    state.jobs.create(
        Some(&operator),
        JobDraft {
            title: "Search Quality Rater".to_string(),
            status: JobStatus::Draft,
            pay_min: 18,
            pay_max: 22,
            pay_type: Some(PayType::PerTask),
            time_commitment: "5-10 hours/week".to_string(),
            remote_worldwide: false,
            allowed_countries: vec!["United States".to_string(), "Canada".to_string()],
            short_description: "Rate search result relevance for evaluation sets.".to_string(),
            full_description: "Judge query and result pairs against a relevance rubric and \
                               record rationales for borderline cases."
                .to_string(),
            responsibilities: "Complete rating tasks within the weekly quota.".to_string(),
            requirements: "Familiarity with web search behavior.".to_string(),
            ..JobDraft::default()
        },
    )?;

    Ok(())
}
