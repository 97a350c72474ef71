//! Calculator identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The calculator that produced a result.
///
/// The serialized names are stable; they key persisted history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculationKind {
    /// Revenue-proportional debt ceiling.
    DebtBrake,
    /// Loan cost analysis.
    CostAnalysis,
    /// Debt snowball payoff plan.
    DebtSnowball,
    /// Covenant compliance check.
    Covenants,
    /// Debt-equity swap simulation.
    EquitySwap,
    /// Funding programme guidance.
    FundingGuidance,
}

impl CalculationKind {
    /// All kinds, in display order.
    pub const ALL: [CalculationKind; 6] = [
        CalculationKind::DebtBrake,
        CalculationKind::CostAnalysis,
        CalculationKind::DebtSnowball,
        CalculationKind::Covenants,
        CalculationKind::EquitySwap,
        CalculationKind::FundingGuidance,
    ];

    /// Returns the stable identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::DebtBrake => "debtBrake",
            CalculationKind::CostAnalysis => "costAnalysis",
            CalculationKind::DebtSnowball => "debtSnowball",
            CalculationKind::Covenants => "covenants",
            CalculationKind::EquitySwap => "equitySwap",
            CalculationKind::FundingGuidance => "fundingGuidance",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::DebtBrake => "Debt Brake",
            CalculationKind::CostAnalysis => "Cost Analysis",
            CalculationKind::DebtSnowball => "Debt Snowball",
            CalculationKind::Covenants => "Covenant Tracking",
            CalculationKind::EquitySwap => "Debt-Equity Swap",
            CalculationKind::FundingGuidance => "Funding Guidance",
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "debtbrake" | "brake" => Ok(CalculationKind::DebtBrake),
            "costanalysis" | "cost" => Ok(CalculationKind::CostAnalysis),
            "debtsnowball" | "snowball" => Ok(CalculationKind::DebtSnowball),
            "covenants" | "covenanttracking" => Ok(CalculationKind::Covenants),
            "equityswap" | "debtequity" | "swap" => Ok(CalculationKind::EquitySwap),
            "fundingguidance" | "funding" => Ok(CalculationKind::FundingGuidance),
            _ => Err(format!("unknown calculation kind: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for kind in CalculationKind::ALL {
            assert_eq!(kind.as_str().parse::<CalculationKind>(), Ok(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("debt-brake".parse::<CalculationKind>(), Ok(CalculationKind::DebtBrake));
        assert_eq!("cost_analysis".parse::<CalculationKind>(), Ok(CalculationKind::CostAnalysis));
        assert_eq!("debt-equity".parse::<CalculationKind>(), Ok(CalculationKind::EquitySwap));
        assert!("mortgage".parse::<CalculationKind>().is_err());
    }
}
