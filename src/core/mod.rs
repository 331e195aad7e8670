// Core algorithm exports
pub mod activity;
pub mod explanation;
pub mod interests;
pub mod lifestyle;
pub mod matcher;
pub mod personality;
pub mod scoring;

pub use activity::activity_score;
pub use explanation::build_explanation;
pub use interests::{interest_score, shared_interests};
pub use lifestyle::{diet_compatibility, education_proximity, lifestyle_score};
pub use matcher::{MatchError, Matcher};
pub use personality::personality_score;
pub use scoring::{calibrate, combine_scores};
