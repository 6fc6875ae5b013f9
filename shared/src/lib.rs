use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction ID in format: "transaction::<income|expense>::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Calendar date of the transaction (RFC 3339 or plain YYYY-MM-DD)
    pub date: String,
    /// Description of the transaction (max 256 characters)
    pub description: String,
    /// Transaction amount, always positive; sign is derived from `transaction_type`
    pub amount: f64,
    /// Category name, drawn from the fixed per-type category tables
    pub category: String,
    /// Type of transaction
    pub transaction_type: TransactionType,
    /// Creation timestamp (RFC 3339), set once by the store
    pub created_at: String,
}

/// Type of transaction for rendering and business logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into the business
    Income,
    /// Money going out of the business
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl Transaction {
    /// Generate transaction ID from type and timestamp
    pub fn generate_id(transaction_type: TransactionType, epoch_millis: u64) -> String {
        format!("transaction::{}::{}", transaction_type, epoch_millis)
    }

    /// Parse transaction ID to extract components
    pub fn parse_id(id: &str) -> Result<(TransactionType, u64), TransactionIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "transaction" {
            return Err(TransactionIdError::InvalidFormat);
        }

        let transaction_type = match parts[1] {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            _ => return Err(TransactionIdError::InvalidType),
        };

        let epoch_millis = parts[2]
            .parse::<u64>()
            .map_err(|_| TransactionIdError::InvalidTimestamp)?;

        Ok((transaction_type, epoch_millis))
    }

    /// Extract epoch timestamp from transaction ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, TransactionIdError> {
        Self::parse_id(&self.id).map(|(_, timestamp)| timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionIdError {
    #[error("Invalid transaction ID format")]
    InvalidFormat,
    #[error("Invalid transaction type")]
    InvalidType,
    #[error("Invalid timestamp in transaction ID")]
    InvalidTimestamp,
}

/// Validation errors for transaction entry, reported before any write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description is too long ({0} characters, maximum 256)")]
    DescriptionTooLong(usize),
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
    #[error("Amount is not a valid number")]
    AmountNotFinite,
    #[error("A date is required")]
    MissingDate,
    #[error("Date '{0}' is not a valid calendar date")]
    InvalidDate(String),
}

/// A month/year pair selecting the reporting window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthRef {
    pub month: u32,
    pub year: i32,
}

impl Default for MonthRef {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Self {
        Self { month, year }
    }

    /// The month immediately before this one
    pub fn previous(&self) -> MonthRef {
        if self.month == 1 {
            MonthRef { month: 12, year: self.year - 1 }
        } else {
            MonthRef { month: self.month - 1, year: self.year }
        }
    }

    /// The month immediately after this one
    pub fn next(&self) -> MonthRef {
        if self.month == 12 {
            MonthRef { month: 1, year: self.year + 1 }
        } else {
            MonthRef { month: self.month + 1, year: self.year }
        }
    }
}

/// Income/expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MonthlySummary {
    pub income: f64,
    pub expense: f64,
    /// Always `income - expense`
    pub balance: f64,
}

/// Per-day income/expense totals within the selected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    /// Calendar date, YYYY-MM-DD
    pub date: String,
    pub income: f64,
    pub expense: f64,
}

/// Expense total for one category, with its display color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// One month of the 6-month trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Short display label, e.g. "Mar 24"
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
}

/// Current month vs. prior month. Percentages are 0 when the prior value
/// is zero (or non-positive, for balance); absolute diffs are always real.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MonthComparison {
    pub income_change_pct: f64,
    pub expense_change_pct: f64,
    pub balance_change_pct: f64,
    pub income_diff: f64,
    pub expense_diff: f64,
    pub balance_diff: f64,
}

/// All transactions of one calendar day with their totals, for drill-down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    /// Calendar date, YYYY-MM-DD
    pub date: String,
    pub income: f64,
    pub expense: f64,
    pub transactions: Vec<Transaction>,
}

/// Stand-out days of the selected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestingDates {
    pub best_sales_day: DayGroup,
    pub highest_expense_day: DayGroup,
    pub best_profit_day: DayGroup,
}

/// A saved transaction template for quick re-entry.
/// Uniqueness key is the `(description, category)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub transaction_type: TransactionType,
}

impl Favorite {
    /// True when both favorites refer to the same template
    pub fn same_template(&self, other: &Favorite) -> bool {
        self.description == other.description && self.category == other.category
    }
}

/// Type filter applied to transaction listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

/// Relative date-window filter, anchored to "today" (not the selected month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodFilter {
    #[default]
    All,
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
}

/// Sort order applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

/// Search/filter/sort parameters for the transaction list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransactionFilter {
    pub search_term: String,
    pub type_filter: TypeFilter,
    pub period_filter: PeriodFilter,
    pub sort_by: SortBy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// Calendar date (YYYY-MM-DD); the current date is used if not provided
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransactionRequest {
    pub id: String,
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

/// Declarative notice for the presentation layer to render after a write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalNotice {
    /// The month's balance crossed the monthly goal from below
    GoalAchieved { balance: f64, goal: f64 },
    /// The month's balance sank below minus twice the monthly goal
    LossWarning { balance: f64, goal: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    pub transaction: Transaction,
    pub goal_notice: Option<GoalNotice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
}

/// Returned when a delete is staged; the delete only becomes final once the
/// grace window has elapsed without an undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionResponse {
    pub transaction_id: String,
    /// Epoch millis after which the delete is committed to the store
    pub undo_deadline_millis: u64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoDeleteResponse {
    pub transaction: Transaction,
    pub success_message: String,
}

/// Everything the dashboard renders for one selected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub month: MonthRef,
    pub summary: MonthlySummary,
    pub daily_breakdown: Vec<DailyBreakdown>,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub monthly_trend: Vec<TrendPoint>,
    pub comparison: MonthComparison,
    pub top_transactions: Vec<Transaction>,
    pub interesting_dates: Option<InterestingDates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMonthlyGoalRequest {
    pub monthly_goal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGoalResponse {
    pub monthly_goal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleFavoriteResponse {
    /// True when the favorite was added, false when it was removed
    pub added: bool,
    pub favorites: Vec<Favorite>,
}

/// Sub-mode of the locked state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinMode {
    /// A PIN exists and must be entered
    Verify,
    /// No PIN exists (or it was reset); a new one must be set and confirmed
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockStatusResponse {
    pub locked: bool,
    /// Present only while locked
    pub mode: Option<PinMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPinRequest {
    pub pin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPinResponse {
    pub success: bool,
    pub locked: bool,
    pub mode: Option<PinMode>,
    pub message: String,
    /// How long the client should display a failure before clearing the
    /// input and refocusing the first cell, in milliseconds
    pub error_display_millis: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetPinRequest {
    /// The reset is destructive and requires explicit confirmation
    pub confirm: bool,
}

/// A downloadable report produced by the export service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}
