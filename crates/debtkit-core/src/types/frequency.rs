//! Payment frequency type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment frequency for loan instalments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Monthly payments (12 per year) - standard for SME loans
    #[default]
    Monthly,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Semi-annual payments (2 per year)
    SemiAnnual,
    /// Annual payments (1 per year)
    Annual,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
            Frequency::SemiAnnual => 2,
            Frequency::Annual => 1,
        }
    }

    /// Returns the number of months per period.
    #[must_use]
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Maps a periods-per-year count back to a frequency.
    #[must_use]
    pub fn from_periods_per_year(periods: u32) -> Option<Self> {
        match periods {
            12 => Some(Frequency::Monthly),
            4 => Some(Frequency::Quarterly),
            2 => Some(Frequency::SemiAnnual),
            1 => Some(Frequency::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Annual => "Annual",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "monthly" | "12" => Ok(Frequency::Monthly),
            "quarterly" | "4" => Ok(Frequency::Quarterly),
            "semi_annual" | "semiannual" | "2" => Ok(Frequency::SemiAnnual),
            "annual" | "yearly" | "1" => Ok(Frequency::Annual),
            other => Err(format!("unknown payment frequency: {other}")),
        }
    }
}
