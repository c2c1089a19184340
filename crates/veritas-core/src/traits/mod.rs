pub mod audit;
pub mod event_bus;
pub mod feedback_archive;
pub mod permission;
pub mod source_validator;

pub use audit::IAuditSink;
pub use event_bus::{IEventBus, IEventHandler};
pub use feedback_archive::IFeedbackArchive;
pub use permission::IPermissionChecker;
pub use source_validator::{ISourceValidator, SourceAssessment};
