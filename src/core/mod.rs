mod engine;
mod store;
mod types;

pub use engine::{
    annual_revenue, comparison_row, compensation, compute_comparison_table,
    cumulative_equity, equity_based_compensation, fee_based_bonus, fee_based_compensation,
    hybrid_commission, hybrid_compensation, revenue_percentage,
};
pub use store::{ParameterStore, coerce_numeric};
pub use types::{
    AUM_LEVELS, BusinessAssumptions, ChartPoint, CommissionBreakdown, CompensationBreakdown,
    CompensationModel, ComparisonRow, EquityBasedTerms, FeeBasedTerms, FieldGroup, HybridTerms,
    ModelComparison, ModelSummary, ParameterField, ParameterSet, TIER_100M, TIER_250M, TIER_500M,
};
