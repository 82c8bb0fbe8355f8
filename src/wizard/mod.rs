//! Survey wizard core: step registry, navigation, branching, validation and
//! payload assembly. Contains no terminal or network I/O.

pub mod answer;
pub mod branch;
pub mod gateway;
pub mod history;
pub mod payload;
pub mod session;
pub mod step;
pub mod validator;

pub use answer::{Answer, StepInput, VoteChoice};
pub use branch::BranchResolver;
pub use gateway::{DryRunGateway, GatewayResponse, SubmissionGateway};
pub use history::NavigationHistory;
pub use payload::{PayloadAssembler, ResponseEntry, SurveyPayload, PAYLOAD_STEPS};
pub use session::{SessionState, StepOutcome, SubmissionReceipt, WizardSession};
pub use step::{StepDescriptor, StepId};
pub use validator::{FieldValidator, Rule, Validation, ValidationError};
