/// Shown for every failed submission, whatever went wrong.
pub const RECOMMENDATION_FAILED: &str = "Failed to get recommendation. Please ensure the backend server is running and check your input values.";

/// State of the recommendation request. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationOutcome {
    Idle,
    Pending,
    Success(String),
    Failure(String),
}

impl Default for RecommendationOutcome {
    fn default() -> Self {
        RecommendationOutcome::Idle
    }
}

impl RecommendationOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, RecommendationOutcome::Pending)
    }

    pub fn crop(&self) -> Option<&str> {
        match self {
            RecommendationOutcome::Success(crop) => Some(crop),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RecommendationOutcome::Failure(message) => Some(message),
            _ => None,
        }
    }
}
