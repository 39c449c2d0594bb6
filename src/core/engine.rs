use super::types::{
    CommissionBreakdown, CompensationBreakdown, CompensationModel, ComparisonRow, EquityBasedTerms,
    FeeBasedTerms, HybridTerms, ModelComparison, ParameterSet, TIER_100M, TIER_250M, TIER_500M,
};

const DOLLARS_PER_MILLION: f64 = 1_000_000.0;
const APPOINTMENT_BLOCK_MILLIONS: f64 = 50.0;
const MONTHS_PER_YEAR: f64 = 12.0;

pub fn annual_revenue(aum_millions: f64, management_fee_percentage: f64) -> f64 {
    aum_millions * DOLLARS_PER_MILLION * (management_fee_percentage / 100.0)
}

/// Compensation as a percentage of revenue. A zero revenue (zero fee or zero
/// AUM) reports 0 rather than a non-finite quotient.
pub fn revenue_percentage(compensation: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        return 0.0;
    }
    let pct = (compensation / revenue) * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

fn setup_component(include_setup: bool, setup_fee: f64) -> f64 {
    if include_setup { setup_fee } else { 0.0 }
}

fn annual_retainer(monthly_retainer: f64) -> f64 {
    monthly_retainer * MONTHS_PER_YEAR
}

pub fn fee_based_bonus(aum: f64, terms: &FeeBasedTerms) -> f64 {
    if aum >= TIER_500M {
        terms.bonus_500m
    } else if aum >= TIER_250M {
        terms.bonus_250m
    } else if aum >= TIER_100M {
        terms.bonus_100m
    } else {
        0.0
    }
}

pub fn cumulative_equity(aum: f64, terms: &EquityBasedTerms) -> f64 {
    let mut equity = terms.initial_equity;
    if aum >= TIER_100M {
        equity += terms.equity_unlock_100m;
    }
    if aum >= TIER_250M {
        equity += terms.equity_unlock_250m;
    }
    if aum >= TIER_500M {
        equity += terms.equity_unlock_500m;
    }
    equity
}

pub fn hybrid_commission(aum: f64, parameters: &ParameterSet) -> CommissionBreakdown {
    let assumptions = &parameters.assumptions;
    let terms = &parameters.hybrid;

    let attributable_aum = aum * (assumptions.attributable_growth_percentage / 100.0);
    let appointments =
        (attributable_aum / APPOINTMENT_BLOCK_MILLIONS) * assumptions.appointments_per_50m;
    let appointment_commission = appointments * terms.commission_per_appointment;
    let aum_commission =
        attributable_aum * DOLLARS_PER_MILLION * (terms.commission_aum_percentage / 100.0);

    CommissionBreakdown {
        attributable_aum,
        appointments,
        appointment_commission,
        aum_commission,
        total: appointment_commission + aum_commission,
    }
}

pub fn fee_based_compensation(
    aum: f64,
    include_setup: bool,
    parameters: &ParameterSet,
) -> CompensationBreakdown {
    let terms = &parameters.fee_based;
    let setup = setup_component(include_setup, terms.setup_fee);
    let retainer = annual_retainer(terms.monthly_retainer);
    let bonus = fee_based_bonus(aum, terms);
    let total_cash = setup + retainer + bonus;
    let revenue = annual_revenue(aum, parameters.assumptions.management_fee_percentage);

    CompensationBreakdown {
        setup,
        retainer,
        bonus,
        commission: 0.0,
        equity: 0.0,
        total_cash,
        revenue_percentage: revenue_percentage(total_cash, revenue),
    }
}

pub fn equity_based_compensation(
    aum: f64,
    include_setup: bool,
    parameters: &ParameterSet,
) -> CompensationBreakdown {
    let terms = &parameters.equity_based;
    let setup = setup_component(include_setup, terms.setup_fee);
    let retainer = annual_retainer(terms.monthly_retainer);
    // Equity is not cash and stays out of the revenue share.
    let total_cash = setup + retainer;
    let revenue = annual_revenue(aum, parameters.assumptions.management_fee_percentage);

    CompensationBreakdown {
        setup,
        retainer,
        bonus: 0.0,
        commission: 0.0,
        equity: cumulative_equity(aum, terms),
        total_cash,
        revenue_percentage: revenue_percentage(total_cash, revenue),
    }
}

pub fn hybrid_compensation(
    aum: f64,
    include_setup: bool,
    parameters: &ParameterSet,
) -> CompensationBreakdown {
    let terms: &HybridTerms = &parameters.hybrid;
    let setup = setup_component(include_setup, terms.setup_fee);
    let retainer = annual_retainer(terms.monthly_retainer);
    let commission = hybrid_commission(aum, parameters).total;
    let total_cash = setup + retainer + commission;
    let revenue = annual_revenue(aum, parameters.assumptions.management_fee_percentage);

    CompensationBreakdown {
        setup,
        retainer,
        bonus: 0.0,
        commission,
        equity: terms.equity_grant,
        total_cash,
        revenue_percentage: revenue_percentage(total_cash, revenue),
    }
}

pub fn compensation(
    model: CompensationModel,
    aum: f64,
    include_setup: bool,
    parameters: &ParameterSet,
) -> CompensationBreakdown {
    match model {
        CompensationModel::FeeBased => fee_based_compensation(aum, include_setup, parameters),
        CompensationModel::EquityBased => equity_based_compensation(aum, include_setup, parameters),
        CompensationModel::Hybrid => hybrid_compensation(aum, include_setup, parameters),
    }
}

fn compare_model(model: CompensationModel, aum: f64, parameters: &ParameterSet) -> ModelComparison {
    ModelComparison {
        with_setup: compensation(model, aum, true, parameters),
        ongoing: compensation(model, aum, false, parameters),
    }
}

pub fn comparison_row(aum: f64, parameters: &ParameterSet) -> ComparisonRow {
    ComparisonRow {
        aum,
        revenue: annual_revenue(aum, parameters.assumptions.management_fee_percentage),
        fee_based: compare_model(CompensationModel::FeeBased, aum, parameters),
        equity_based: compare_model(CompensationModel::EquityBased, aum, parameters),
        hybrid: compare_model(CompensationModel::Hybrid, aum, parameters),
        hybrid_commission: hybrid_commission(aum, parameters),
    }
}

/// Recomputes every row from scratch, in the order of `aum_levels`.
pub fn compute_comparison_table(parameters: &ParameterSet, aum_levels: &[f64]) -> Vec<ComparisonRow> {
    aum_levels
        .iter()
        .map(|&aum| comparison_row(aum, parameters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AUM_LEVELS;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_parameters() -> ParameterSet {
        ParameterSet::default()
    }

    fn row_at(aum: f64) -> ComparisonRow {
        let table = compute_comparison_table(&sample_parameters(), &AUM_LEVELS);
        table
            .into_iter()
            .find(|row| row.aum == aum)
            .expect("aum level present in table")
    }

    #[test]
    fn annual_revenue_scales_aum_by_fee() {
        assert_approx(annual_revenue(500.0, 1.0), 5_000_000.0);
        assert_approx(annual_revenue(50.0, 0.75), 375_000.0);
        assert_approx(annual_revenue(250.0, 0.0), 0.0);
        assert!(annual_revenue(100.0, -1.0) < 0.0);
    }

    #[test]
    fn revenue_percentage_is_zero_when_revenue_is_zero() {
        assert_eq!(revenue_percentage(48_000.0, 0.0), 0.0);
        assert_eq!(revenue_percentage(0.0, 0.0), 0.0);
        assert_eq!(revenue_percentage(-10.0, -0.0), 0.0);
    }

    #[test]
    fn revenue_percentage_divides_by_revenue() {
        assert_approx(revenue_percentage(88_000.0, 5_000_000.0), 1.76);
        assert_approx(revenue_percentage(50_000.0, -1_000_000.0), -5.0);
    }

    #[test]
    fn zero_fee_yields_zero_revenue_share_everywhere() {
        let mut parameters = sample_parameters();
        parameters.assumptions.management_fee_percentage = 0.0;
        for row in compute_comparison_table(&parameters, &AUM_LEVELS) {
            assert_eq!(row.revenue, 0.0);
            for model in CompensationModel::ALL {
                let comparison = row.model(model);
                assert_eq!(comparison.ongoing.revenue_percentage, 0.0);
                assert_eq!(comparison.with_setup.revenue_percentage, 0.0);
                assert!(comparison.ongoing.total_cash > 0.0);
            }
        }
    }

    #[test]
    fn zero_aum_level_is_well_defined() {
        let row = comparison_row(0.0, &sample_parameters());
        assert_eq!(row.revenue, 0.0);
        assert_eq!(row.fee_based.ongoing.bonus, 0.0);
        assert_eq!(row.fee_based.ongoing.revenue_percentage, 0.0);
        assert_approx(row.hybrid.ongoing.commission, 0.0);
        assert_approx(row.equity_based.ongoing.equity, 1.0);
    }

    #[test]
    fn default_scenario_at_500m() {
        let row = row_at(500.0);
        assert_approx(row.revenue, 5_000_000.0);

        let fee = row.fee_based.ongoing;
        assert_approx(fee.retainer, 48_000.0);
        assert_approx(fee.bonus, 40_000.0);
        assert_approx(fee.total_cash, 88_000.0);
        assert_approx(fee.revenue_percentage, 1.76);
        assert_eq!(fee.setup, 0.0);
        assert_eq!(fee.commission, 0.0);
        assert_eq!(fee.equity, 0.0);

        let commission = row.hybrid_commission;
        assert_approx(commission.attributable_aum, 200.0);
        assert_approx(commission.appointments, 80.0);
        assert_approx(commission.appointment_commission, 24_000.0);
        assert_approx(commission.aum_commission, 100_000.0);
        assert_approx(commission.total, 124_000.0);

        let hybrid = row.hybrid.ongoing;
        assert_approx(hybrid.retainer, 36_000.0);
        assert_approx(hybrid.commission, 124_000.0);
        assert_approx(hybrid.total_cash, 160_000.0);
        assert_approx(hybrid.equity, 0.25);
        assert_approx(hybrid.revenue_percentage, 3.2);

        assert_approx(row.equity_based.ongoing.equity, 2.5);
        assert_approx(row.equity_based.ongoing.total_cash, 30_000.0);
    }

    #[test]
    fn default_scenario_at_50m() {
        let row = row_at(50.0);
        assert_approx(row.fee_based.ongoing.bonus, 0.0);
        assert_approx(row.fee_based.ongoing.total_cash, 48_000.0);
        assert_approx(row.equity_based.ongoing.equity, 1.0);

        let commission = row.hybrid_commission;
        assert_approx(commission.attributable_aum, 20.0);
        assert_approx(commission.appointments, 8.0);
        assert_approx(commission.appointment_commission, 2_400.0);
        assert_approx(commission.aum_commission, 10_000.0);
        assert_approx(row.hybrid.ongoing.commission, 12_400.0);
        assert_approx(row.hybrid.ongoing.total_cash, 48_400.0);
    }

    #[test]
    fn with_setup_variant_adds_only_the_setup_fee() {
        let parameters = sample_parameters();
        for aum in AUM_LEVELS {
            let row = comparison_row(aum, &parameters);
            assert_approx(
                row.fee_based.with_setup.total_cash - row.fee_based.ongoing.total_cash,
                7_500.0,
            );
            assert_approx(
                row.equity_based.with_setup.total_cash - row.equity_based.ongoing.total_cash,
                3_000.0,
            );
            assert_approx(
                row.hybrid.with_setup.total_cash - row.hybrid.ongoing.total_cash,
                5_000.0,
            );
            assert_eq!(row.equity_based.with_setup.equity, row.equity_based.ongoing.equity);
        }
    }

    #[test]
    fn tier_thresholds_are_inclusive() {
        let parameters = sample_parameters();
        let fee = &parameters.fee_based;
        assert_eq!(fee_based_bonus(99.999, fee), 0.0);
        assert_eq!(fee_based_bonus(100.0, fee), fee.bonus_100m);
        assert_eq!(fee_based_bonus(249.999, fee), fee.bonus_100m);
        assert_eq!(fee_based_bonus(250.0, fee), fee.bonus_250m);
        assert_eq!(fee_based_bonus(499.999, fee), fee.bonus_250m);
        assert_eq!(fee_based_bonus(500.0, fee), fee.bonus_500m);
        assert_eq!(fee_based_bonus(10_000.0, fee), fee.bonus_500m);

        let equity = &parameters.equity_based;
        assert_approx(cumulative_equity(99.0, equity), 1.0);
        assert_approx(cumulative_equity(100.0, equity), 1.25);
        assert_approx(cumulative_equity(250.0, equity), 1.75);
        assert_approx(cumulative_equity(500.0, equity), 2.5);
        assert_approx(cumulative_equity(750.0, equity), 2.5);
    }

    #[test]
    fn recompute_is_byte_identical() {
        let parameters = sample_parameters();
        let first = serde_json::to_string(&compute_comparison_table(&parameters, &AUM_LEVELS))
            .expect("rows serialize");
        let second = serde_json::to_string(&compute_comparison_table(&parameters, &AUM_LEVELS))
            .expect("rows serialize");
        assert_eq!(first, second);
    }

    #[test]
    fn table_follows_aum_level_order() {
        let table = compute_comparison_table(&sample_parameters(), &AUM_LEVELS);
        let levels: Vec<f64> = table.iter().map(|row| row.aum).collect();
        assert_eq!(levels, AUM_LEVELS.to_vec());
        assert!(compute_comparison_table(&sample_parameters(), &[]).is_empty());
    }

    #[test]
    fn chart_point_mirrors_ongoing_figures() {
        let row = row_at(250.0);
        let point = row.chart_point();
        assert_eq!(point.aum, 250.0);
        assert_eq!(point.model1_ongoing, row.fee_based.ongoing.total_cash);
        assert_eq!(point.model2_ongoing, row.equity_based.ongoing.total_cash);
        assert_eq!(point.model3_ongoing, row.hybrid.ongoing.total_cash);
        assert_eq!(point.model3_revenue_percent, row.hybrid.ongoing.revenue_percentage);

        let json = serde_json::to_string(&point).expect("chart point serializes");
        assert!(json.contains("\"model1Ongoing\""));
        assert!(json.contains("\"model2RevenuePercent\""));
    }

    #[test]
    fn summary_uses_ongoing_cash_and_setup_variant_equity() {
        let row = row_at(100.0);
        let summary = row.equity_based.summary();
        assert_eq!(summary.ongoing_cash, row.equity_based.ongoing.total_cash);
        assert_eq!(summary.revenue_percentage, row.equity_based.ongoing.revenue_percentage);
        assert_eq!(summary.equity, row.equity_based.with_setup.equity);
        assert_eq!(summary.setup_fee, 3_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_annual_revenue_matches_formula(
            aum in 0u32..2_000,
            fee_bp in -500i32..500,
        ) {
            let aum = aum as f64;
            let fee = fee_bp as f64 / 100.0;
            prop_assert_eq!(annual_revenue(aum, fee), aum * 1_000_000.0 * (fee / 100.0));
        }

        #[test]
        fn prop_fee_based_bonus_is_exclusive(aum in 0u32..1_500) {
            let terms = FeeBasedTerms {
                bonus_100m: 1.0,
                bonus_250m: 10.0,
                bonus_500m: 100.0,
                ..FeeBasedTerms::default()
            };
            let aum = aum as f64;
            let expected = if aum >= 500.0 {
                100.0
            } else if aum >= 250.0 {
                10.0
            } else if aum >= 100.0 {
                1.0
            } else {
                0.0
            };
            prop_assert_eq!(fee_based_bonus(aum, &terms), expected);
        }

        #[test]
        fn prop_equity_is_non_decreasing_in_aum(
            low in 0u32..1_000,
            step in 0u32..1_000,
            initial_bp in 0u32..500,
            unlock_bp in 0u32..200,
        ) {
            let terms = EquityBasedTerms {
                initial_equity: initial_bp as f64 / 100.0,
                equity_unlock_100m: unlock_bp as f64 / 100.0,
                equity_unlock_250m: unlock_bp as f64 / 50.0,
                equity_unlock_500m: unlock_bp as f64 / 25.0,
                ..EquityBasedTerms::default()
            };
            let low = low as f64;
            let high = low + step as f64;
            prop_assert!(cumulative_equity(low, &terms) <= cumulative_equity(high, &terms));
        }

        #[test]
        fn prop_hybrid_commission_is_linear_in_growth_and_appointments(
            aum_index in 0usize..5,
            growth in 1u32..100,
            appointments in 1u32..60,
            factor in 1u32..5,
        ) {
            let aum = AUM_LEVELS[aum_index];
            let mut base = sample_parameters();
            base.assumptions.attributable_growth_percentage = growth as f64;
            base.assumptions.appointments_per_50m = appointments as f64;

            let mut scaled_growth = base;
            scaled_growth.assumptions.attributable_growth_percentage = (growth * factor) as f64;
            let base_total = hybrid_commission(aum, &base).total;
            let scaled_total = hybrid_commission(aum, &scaled_growth).total;
            assert_approx_tol(scaled_total, base_total * factor as f64, 1e-6 * scaled_total.max(1.0));

            let mut scaled_appointments = base;
            scaled_appointments.assumptions.appointments_per_50m = (appointments * factor) as f64;
            let base_appointment = hybrid_commission(aum, &base).appointment_commission;
            let scaled_appointment = hybrid_commission(aum, &scaled_appointments).appointment_commission;
            assert_approx_tol(
                scaled_appointment,
                base_appointment * factor as f64,
                1e-6 * scaled_appointment.max(1.0),
            );
            prop_assert_eq!(
                hybrid_commission(aum, &scaled_appointments).aum_commission,
                hybrid_commission(aum, &base).aum_commission
            );
        }

        #[test]
        fn prop_rows_are_finite(
            fee_bp in 0u32..300,
            growth in 0u32..100,
            retainer in 0u32..20_000,
        ) {
            let mut parameters = sample_parameters();
            parameters.assumptions.management_fee_percentage = fee_bp as f64 / 100.0;
            parameters.assumptions.attributable_growth_percentage = growth as f64;
            parameters.fee_based.monthly_retainer = retainer as f64;
            for row in compute_comparison_table(&parameters, &AUM_LEVELS) {
                for model in CompensationModel::ALL {
                    let comparison = row.model(model);
                    prop_assert!(comparison.ongoing.total_cash.is_finite());
                    prop_assert!(comparison.ongoing.revenue_percentage.is_finite());
                    prop_assert!(comparison.with_setup.total_cash >= comparison.ongoing.total_cash);
                }
            }
        }
    }
}
