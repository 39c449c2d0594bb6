use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PartnerModelError;

pub const AUM_LEVELS: [f64; 5] = [50.0, 100.0, 250.0, 500.0, 750.0];

pub const TIER_100M: f64 = 100.0;
pub const TIER_250M: f64 = 250.0;
pub const TIER_500M: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessAssumptions {
    pub management_fee_percentage: f64,
    pub attributable_growth_percentage: f64,
    #[serde(rename = "appointmentsPer50M")]
    pub appointments_per_50m: f64,
}

impl Default for BusinessAssumptions {
    fn default() -> Self {
        Self {
            management_fee_percentage: 1.0,
            attributable_growth_percentage: 40.0,
            appointments_per_50m: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeeBasedTerms {
    pub setup_fee: f64,
    pub monthly_retainer: f64,
    #[serde(rename = "bonus100M")]
    pub bonus_100m: f64,
    #[serde(rename = "bonus250M")]
    pub bonus_250m: f64,
    #[serde(rename = "bonus500M")]
    pub bonus_500m: f64,
}

impl Default for FeeBasedTerms {
    fn default() -> Self {
        Self {
            setup_fee: 7_500.0,
            monthly_retainer: 4_000.0,
            bonus_100m: 10_000.0,
            bonus_250m: 20_000.0,
            bonus_500m: 40_000.0,
        }
    }
}

/// Equity figures are percentages of the firm, not currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquityBasedTerms {
    pub setup_fee: f64,
    pub monthly_retainer: f64,
    pub initial_equity: f64,
    #[serde(rename = "equityUnlock100M")]
    pub equity_unlock_100m: f64,
    #[serde(rename = "equityUnlock250M")]
    pub equity_unlock_250m: f64,
    #[serde(rename = "equityUnlock500M")]
    pub equity_unlock_500m: f64,
}

impl Default for EquityBasedTerms {
    fn default() -> Self {
        Self {
            setup_fee: 3_000.0,
            monthly_retainer: 2_500.0,
            initial_equity: 1.0,
            equity_unlock_100m: 0.25,
            equity_unlock_250m: 0.50,
            equity_unlock_500m: 0.75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HybridTerms {
    pub setup_fee: f64,
    pub monthly_retainer: f64,
    pub commission_per_appointment: f64,
    #[serde(rename = "commissionAUMPercentage")]
    pub commission_aum_percentage: f64,
    pub equity_grant: f64,
}

impl Default for HybridTerms {
    fn default() -> Self {
        Self {
            setup_fee: 5_000.0,
            monthly_retainer: 3_000.0,
            commission_per_appointment: 300.0,
            commission_aum_percentage: 0.05,
            equity_grant: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterSet {
    pub assumptions: BusinessAssumptions,
    pub fee_based: FeeBasedTerms,
    pub equity_based: EquityBasedTerms,
    pub hybrid: HybridTerms,
}

impl ParameterSet {
    pub fn get(&self, field: ParameterField) -> f64 {
        use ParameterField as F;
        match field {
            F::ManagementFeePercentage => self.assumptions.management_fee_percentage,
            F::AttributableGrowthPercentage => self.assumptions.attributable_growth_percentage,
            F::AppointmentsPer50M => self.assumptions.appointments_per_50m,
            F::Model1SetupFee => self.fee_based.setup_fee,
            F::Model1MonthlyRetainer => self.fee_based.monthly_retainer,
            F::Model1Bonus100M => self.fee_based.bonus_100m,
            F::Model1Bonus250M => self.fee_based.bonus_250m,
            F::Model1Bonus500M => self.fee_based.bonus_500m,
            F::Model2SetupFee => self.equity_based.setup_fee,
            F::Model2MonthlyRetainer => self.equity_based.monthly_retainer,
            F::Model2InitialEquity => self.equity_based.initial_equity,
            F::Model2EquityUnlock100M => self.equity_based.equity_unlock_100m,
            F::Model2EquityUnlock250M => self.equity_based.equity_unlock_250m,
            F::Model2EquityUnlock500M => self.equity_based.equity_unlock_500m,
            F::Model3SetupFee => self.hybrid.setup_fee,
            F::Model3MonthlyRetainer => self.hybrid.monthly_retainer,
            F::Model3CommissionPerAppointment => self.hybrid.commission_per_appointment,
            F::Model3CommissionAumPercentage => self.hybrid.commission_aum_percentage,
            F::Model3EquityGrant => self.hybrid.equity_grant,
        }
    }

    /// Replaces exactly one field. Non-finite values are stored as 0.
    pub fn set(&mut self, field: ParameterField, value: f64) {
        use ParameterField as F;
        let value = if value.is_finite() { value } else { 0.0 };
        let slot = match field {
            F::ManagementFeePercentage => &mut self.assumptions.management_fee_percentage,
            F::AttributableGrowthPercentage => {
                &mut self.assumptions.attributable_growth_percentage
            }
            F::AppointmentsPer50M => &mut self.assumptions.appointments_per_50m,
            F::Model1SetupFee => &mut self.fee_based.setup_fee,
            F::Model1MonthlyRetainer => &mut self.fee_based.monthly_retainer,
            F::Model1Bonus100M => &mut self.fee_based.bonus_100m,
            F::Model1Bonus250M => &mut self.fee_based.bonus_250m,
            F::Model1Bonus500M => &mut self.fee_based.bonus_500m,
            F::Model2SetupFee => &mut self.equity_based.setup_fee,
            F::Model2MonthlyRetainer => &mut self.equity_based.monthly_retainer,
            F::Model2InitialEquity => &mut self.equity_based.initial_equity,
            F::Model2EquityUnlock100M => &mut self.equity_based.equity_unlock_100m,
            F::Model2EquityUnlock250M => &mut self.equity_based.equity_unlock_250m,
            F::Model2EquityUnlock500M => &mut self.equity_based.equity_unlock_500m,
            F::Model3SetupFee => &mut self.hybrid.setup_fee,
            F::Model3MonthlyRetainer => &mut self.hybrid.monthly_retainer,
            F::Model3CommissionPerAppointment => &mut self.hybrid.commission_per_appointment,
            F::Model3CommissionAumPercentage => &mut self.hybrid.commission_aum_percentage,
            F::Model3EquityGrant => &mut self.hybrid.equity_grant,
        };
        *slot = value;
    }

    /// Non-finite values loaded from a file are zeroed so every field stays finite.
    pub fn sanitized(mut self) -> Self {
        for field in ParameterField::ALL {
            let value = self.get(field);
            self.set(field, value);
        }
        self
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ParameterField {
    #[serde(rename = "managementFeePercentage")]
    ManagementFeePercentage,
    #[serde(rename = "attributableGrowthPercentage")]
    AttributableGrowthPercentage,
    #[serde(rename = "appointmentsPer50M")]
    AppointmentsPer50M,
    #[serde(rename = "model1SetupFee")]
    Model1SetupFee,
    #[serde(rename = "model1MonthlyRetainer")]
    Model1MonthlyRetainer,
    #[serde(rename = "model1Bonus100M")]
    Model1Bonus100M,
    #[serde(rename = "model1Bonus250M")]
    Model1Bonus250M,
    #[serde(rename = "model1Bonus500M")]
    Model1Bonus500M,
    #[serde(rename = "model2SetupFee")]
    Model2SetupFee,
    #[serde(rename = "model2MonthlyRetainer")]
    Model2MonthlyRetainer,
    #[serde(rename = "model2InitialEquity")]
    Model2InitialEquity,
    #[serde(rename = "model2EquityUnlock100M")]
    Model2EquityUnlock100M,
    #[serde(rename = "model2EquityUnlock250M")]
    Model2EquityUnlock250M,
    #[serde(rename = "model2EquityUnlock500M")]
    Model2EquityUnlock500M,
    #[serde(rename = "model3SetupFee")]
    Model3SetupFee,
    #[serde(rename = "model3MonthlyRetainer")]
    Model3MonthlyRetainer,
    #[serde(rename = "model3CommissionPerAppointment")]
    Model3CommissionPerAppointment,
    #[serde(rename = "model3CommissionAUMPercentage")]
    Model3CommissionAumPercentage,
    #[serde(rename = "model3EquityGrant")]
    Model3EquityGrant,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldGroup {
    Assumptions,
    FeeBased,
    EquityBased,
    Hybrid,
}

impl ParameterField {
    pub const ALL: [ParameterField; 19] = [
        ParameterField::ManagementFeePercentage,
        ParameterField::AttributableGrowthPercentage,
        ParameterField::AppointmentsPer50M,
        ParameterField::Model1SetupFee,
        ParameterField::Model1MonthlyRetainer,
        ParameterField::Model1Bonus100M,
        ParameterField::Model1Bonus250M,
        ParameterField::Model1Bonus500M,
        ParameterField::Model2SetupFee,
        ParameterField::Model2MonthlyRetainer,
        ParameterField::Model2InitialEquity,
        ParameterField::Model2EquityUnlock100M,
        ParameterField::Model2EquityUnlock250M,
        ParameterField::Model2EquityUnlock500M,
        ParameterField::Model3SetupFee,
        ParameterField::Model3MonthlyRetainer,
        ParameterField::Model3CommissionPerAppointment,
        ParameterField::Model3CommissionAumPercentage,
        ParameterField::Model3EquityGrant,
    ];

    pub fn as_str(self) -> &'static str {
        use ParameterField as F;
        match self {
            F::ManagementFeePercentage => "managementFeePercentage",
            F::AttributableGrowthPercentage => "attributableGrowthPercentage",
            F::AppointmentsPer50M => "appointmentsPer50M",
            F::Model1SetupFee => "model1SetupFee",
            F::Model1MonthlyRetainer => "model1MonthlyRetainer",
            F::Model1Bonus100M => "model1Bonus100M",
            F::Model1Bonus250M => "model1Bonus250M",
            F::Model1Bonus500M => "model1Bonus500M",
            F::Model2SetupFee => "model2SetupFee",
            F::Model2MonthlyRetainer => "model2MonthlyRetainer",
            F::Model2InitialEquity => "model2InitialEquity",
            F::Model2EquityUnlock100M => "model2EquityUnlock100M",
            F::Model2EquityUnlock250M => "model2EquityUnlock250M",
            F::Model2EquityUnlock500M => "model2EquityUnlock500M",
            F::Model3SetupFee => "model3SetupFee",
            F::Model3MonthlyRetainer => "model3MonthlyRetainer",
            F::Model3CommissionPerAppointment => "model3CommissionPerAppointment",
            F::Model3CommissionAumPercentage => "model3CommissionAUMPercentage",
            F::Model3EquityGrant => "model3EquityGrant",
        }
    }

    pub fn label(self) -> &'static str {
        use ParameterField as F;
        match self {
            F::ManagementFeePercentage => "Annual Management Fee (%)",
            F::AttributableGrowthPercentage => "Attributable Growth (%)",
            F::AppointmentsPer50M => "Appointments per $50M AUM",
            F::Model1SetupFee | F::Model2SetupFee | F::Model3SetupFee => "Setup Fee",
            F::Model1MonthlyRetainer | F::Model2MonthlyRetainer | F::Model3MonthlyRetainer => {
                "Monthly Retainer"
            }
            F::Model1Bonus100M => "$100M AUM Bonus",
            F::Model1Bonus250M => "$250M AUM Bonus",
            F::Model1Bonus500M => "$500M AUM Bonus",
            F::Model2InitialEquity => "Initial Grant (%)",
            F::Model2EquityUnlock100M => "$100M AUM Unlock (%)",
            F::Model2EquityUnlock250M => "$250M AUM Unlock (%)",
            F::Model2EquityUnlock500M => "$500M AUM Unlock (%)",
            F::Model3CommissionPerAppointment => "Per Appointment",
            F::Model3CommissionAumPercentage => "AUM Commission (%)",
            F::Model3EquityGrant => "Equity Grant (%)",
        }
    }

    pub fn group(self) -> FieldGroup {
        use ParameterField as F;
        match self {
            F::ManagementFeePercentage | F::AttributableGrowthPercentage | F::AppointmentsPer50M => {
                FieldGroup::Assumptions
            }
            F::Model1SetupFee
            | F::Model1MonthlyRetainer
            | F::Model1Bonus100M
            | F::Model1Bonus250M
            | F::Model1Bonus500M => FieldGroup::FeeBased,
            F::Model2SetupFee
            | F::Model2MonthlyRetainer
            | F::Model2InitialEquity
            | F::Model2EquityUnlock100M
            | F::Model2EquityUnlock250M
            | F::Model2EquityUnlock500M => FieldGroup::EquityBased,
            F::Model3SetupFee
            | F::Model3MonthlyRetainer
            | F::Model3CommissionPerAppointment
            | F::Model3CommissionAumPercentage
            | F::Model3EquityGrant => FieldGroup::Hybrid,
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterField {
    type Err = PartnerModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ParameterField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| PartnerModelError::UnknownField(key.to_string()))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompensationModel {
    FeeBased,
    EquityBased,
    Hybrid,
}

impl CompensationModel {
    pub const ALL: [CompensationModel; 3] = [
        CompensationModel::FeeBased,
        CompensationModel::EquityBased,
        CompensationModel::Hybrid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CompensationModel::FeeBased => "Model 1: Fee Based Partner",
            CompensationModel::EquityBased => "Model 2: Equity Based Partner",
            CompensationModel::Hybrid => "Model 3: Hybrid Fee/Equity Partner",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationBreakdown {
    pub setup: f64,
    pub retainer: f64,
    pub bonus: f64,
    pub commission: f64,
    pub equity: f64,
    pub total_cash: f64,
    pub revenue_percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionBreakdown {
    #[serde(rename = "attributableAUM")]
    pub attributable_aum: f64,
    pub appointments: f64,
    pub appointment_commission: f64,
    pub aum_commission: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelComparison {
    pub with_setup: CompensationBreakdown,
    pub ongoing: CompensationBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub ongoing_cash: f64,
    pub revenue_percentage: f64,
    pub equity: f64,
    pub setup_fee: f64,
    pub with_setup_cash: f64,
}

impl ModelComparison {
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            ongoing_cash: self.ongoing.total_cash,
            revenue_percentage: self.ongoing.revenue_percentage,
            equity: self.with_setup.equity,
            setup_fee: self.with_setup.setup,
            with_setup_cash: self.with_setup.total_cash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub aum: f64,
    pub revenue: f64,
    pub fee_based: ModelComparison,
    pub equity_based: ModelComparison,
    pub hybrid: ModelComparison,
    pub hybrid_commission: CommissionBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub aum: f64,
    pub model1_ongoing: f64,
    pub model2_ongoing: f64,
    pub model3_ongoing: f64,
    pub model1_revenue_percent: f64,
    pub model2_revenue_percent: f64,
    pub model3_revenue_percent: f64,
}

impl ComparisonRow {
    pub fn model(&self, model: CompensationModel) -> &ModelComparison {
        match model {
            CompensationModel::FeeBased => &self.fee_based,
            CompensationModel::EquityBased => &self.equity_based,
            CompensationModel::Hybrid => &self.hybrid,
        }
    }

    pub fn chart_point(&self) -> ChartPoint {
        ChartPoint {
            aum: self.aum,
            model1_ongoing: self.fee_based.ongoing.total_cash,
            model2_ongoing: self.equity_based.ongoing.total_cash,
            model3_ongoing: self.hybrid.ongoing.total_cash,
            model1_revenue_percent: self.fee_based.ongoing.revenue_percentage,
            model2_revenue_percent: self.equity_based.ongoing.revenue_percentage,
            model3_revenue_percent: self.hybrid.ongoing.revenue_percentage,
        }
    }
}
