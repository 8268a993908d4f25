use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("Please sign in to view your budget")]
    AuthRequired,

    #[error("Failed to load budget data: {0}")]
    FetchFailed(String),

    #[error("Failed to update budget: {0}")]
    WriteFailed(String),

    #[error("Invalid input: {0}")]
    ValidationFailed(String),

    #[error("Failed to access saved budgets: {0}")]
    LocalStorageFailed(String),
}

impl BudgetError {
    pub fn title(&self) -> &'static str {
        match self {
            BudgetError::AuthRequired => "Sign in required",
            BudgetError::ValidationFailed(_) => "Invalid input",
            _ => "Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;
