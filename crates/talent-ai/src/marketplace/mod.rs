//! Job & application lifecycle engine: posting publication states,
//! application intake and review, the reviewer note ledger, and the
//! read-only projections behind the console and the public site.

pub mod applications;
pub mod auth;
pub mod clock;
pub mod error;
pub mod export;
pub mod jobs;
pub mod reporting;
pub mod router;
pub mod store;

pub use applications::domain::{
    Application, ApplicationId, ApplicationNote, ApplicationSource, ApplicationStatus,
    IntakeSubmission, NoteId, ReviewTransitionPolicy,
};
pub use applications::intake::ApplicationIntake;
pub use applications::review::ApplicationReviewService;
pub use auth::{AuthGateway, OperatorDirectory, OperatorId, OperatorIdentity};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{
    CapacityError, ConflictError, LifecycleError, NotFoundError, UnauthorizedError,
    ValidationError,
};
pub use export::{applications_csv, export_filename, ExportError};
pub use jobs::domain::{Job, JobDraft, JobId, JobStatus, JobTransitionPolicy, PayType};
pub use jobs::service::JobLifecycleService;
pub use jobs::slug::{derive_slug, SlugAllocator};
pub use reporting::{ApplicationListFilter, JobListFilter, ReportService};
pub use router::{marketplace_router, MarketplaceState};
pub use store::{MarketplaceStore, MemoryStore, StorageError};
