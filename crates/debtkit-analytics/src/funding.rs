//! Public funding programme guidance.
//!
//! The bundled catalogue holds illustrative sample programmes only; it is not
//! real programme data. Callers with a real catalogue build their own
//! [`FundingCatalog`].

use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use debtkit_core::{Money, Percent};

use crate::error::AnalyticsResult;

/// Company size class used to filter programmes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    /// Programmes up to 500,000
    #[default]
    Small,
    /// Programmes up to 2,000,000
    Medium,
    /// Any programme
    Large,
}

impl CompanySize {
    /// Largest programme volume suitable for the size class.
    #[must_use]
    pub fn max_programme_amount(&self) -> Option<Money> {
        match self {
            CompanySize::Small => Some(Money::new(dec!(500000))),
            CompanySize::Medium => Some(Money::new(dec!(2000000))),
            CompanySize::Large => None,
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanySize::Small => write!(f, "small"),
            CompanySize::Medium => write!(f, "medium"),
            CompanySize::Large => write!(f, "large"),
        }
    }
}

impl FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(CompanySize::Small),
            "medium" => Ok(CompanySize::Medium),
            "large" => Ok(CompanySize::Large),
            other => Err(format!("unknown company size '{other}' (small, medium, large)")),
        }
    }
}

/// A funding programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingProgram {
    /// Programme name
    pub name: String,
    /// Issuing body
    pub provider: String,
    /// Largest amount the programme grants
    pub max_amount: Money,
    /// Annual interest rate, 0 for grants
    pub interest_rate: Percent,
    /// Short description
    pub description: String,
}

/// A funding guidance request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingRequest {
    /// Size class of the applicant
    #[serde(default)]
    pub company_size: CompanySize,
    /// Amount the applicant wants to raise
    #[serde(default)]
    pub requested_amount: Option<Money>,
}

impl FundingRequest {
    /// Creates a request for a size class with no amount.
    #[must_use]
    pub fn new(company_size: CompanySize) -> Self {
        Self {
            company_size,
            requested_amount: None,
        }
    }

    /// Sets the requested amount.
    #[must_use]
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.requested_amount = Some(amount);
        self
    }
}

/// Programmes matching a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingGuidance {
    /// Size class the guidance was built for
    pub company_size: CompanySize,
    /// Requested amount, if any
    pub requested_amount: Option<Money>,
    /// Matching programmes, in catalogue order
    pub programs: Vec<FundingProgram>,
    /// Number of matching programmes
    pub count: usize,
}

/// A list of funding programmes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FundingCatalog {
    programs: Vec<FundingProgram>,
}

static SAMPLE_CATALOG: Lazy<FundingCatalog> = Lazy::new(|| {
    FundingCatalog::new(vec![
        FundingProgram {
            name: "KfW SME Loan".into(),
            provider: "KfW".into(),
            max_amount: Money::new(dec!(1000000)),
            interest_rate: Percent::new(dec!(2.5)),
            description: "Low-interest loan for investments and working capital".into(),
        },
        FundingProgram {
            name: "EU Horizon Europe".into(),
            provider: "European Commission".into(),
            max_amount: Money::new(dec!(5000000)),
            interest_rate: Percent::ZERO,
            description: "Research and innovation grant".into(),
        },
        FundingProgram {
            name: "Digital Innovation Fund".into(),
            provider: "Regional development bank".into(),
            max_amount: Money::new(dec!(500000)),
            interest_rate: Percent::new(dec!(1.5)),
            description: "Support for digitalisation projects".into(),
        },
    ])
});

impl FundingCatalog {
    /// Creates a catalogue from programmes.
    #[must_use]
    pub fn new(programs: Vec<FundingProgram>) -> Self {
        Self { programs }
    }

    /// The bundled sample catalogue.
    #[must_use]
    pub fn sample() -> &'static FundingCatalog {
        &SAMPLE_CATALOG
    }

    /// All programmes.
    #[must_use]
    pub fn programs(&self) -> &[FundingProgram] {
        &self.programs
    }

    /// Programmes suitable for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested amount is not positive.
    pub fn recommend(&self, request: &FundingRequest) -> AnalyticsResult<FundingGuidance> {
        if let Some(amount) = request.requested_amount {
            amount.validate_positive("requested_amount")?;
        }

        let size_cap = request.company_size.max_programme_amount();
        let programs: Vec<FundingProgram> = self
            .programs
            .iter()
            .filter(|p| size_cap.map_or(true, |cap| p.max_amount <= cap))
            .filter(|p| request.requested_amount.map_or(true, |amount| p.max_amount >= amount))
            .cloned()
            .collect();

        Ok(FundingGuidance {
            company_size: request.company_size,
            requested_amount: request.requested_amount,
            count: programs.len(),
            programs,
        })
    }
}

/// Recommends programmes from the sample catalogue.
///
/// # Errors
///
/// Returns an error if the requested amount is not positive.
pub fn recommend_funding(request: &FundingRequest) -> AnalyticsResult<FundingGuidance> {
    FundingCatalog::sample().recommend(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(guidance: &FundingGuidance) -> Vec<&str> {
        guidance.programs.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_size_filter() {
        let small = recommend_funding(&FundingRequest {
            company_size: CompanySize::Small,
            requested_amount: None,
        })
        .unwrap();
        assert_eq!(names(&small), ["Digital Innovation Fund"]);

        let medium = recommend_funding(&FundingRequest {
            company_size: CompanySize::Medium,
            requested_amount: None,
        })
        .unwrap();
        assert_eq!(names(&medium), ["KfW SME Loan", "Digital Innovation Fund"]);

        let large = recommend_funding(&FundingRequest {
            company_size: CompanySize::Large,
            requested_amount: None,
        })
        .unwrap();
        assert_eq!(large.count, 3);
    }

    #[test]
    fn test_requested_amount_filter() {
        let request = FundingRequest::new(CompanySize::Large).with_amount(Money::new(dec!(750000)));
        let guidance = recommend_funding(&request).unwrap();
        assert_eq!(names(&guidance), ["KfW SME Loan", "EU Horizon Europe"]);

        let none = recommend_funding(&FundingRequest {
            company_size: CompanySize::Small,
            requested_amount: Some(Money::new(dec!(600000))),
        })
        .unwrap();
        assert_eq!(none.count, 0);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let result = recommend_funding(&FundingRequest {
            company_size: CompanySize::Large,
            requested_amount: Some(Money::ZERO),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_company_size() {
        assert_eq!("Medium".parse::<CompanySize>().unwrap(), CompanySize::Medium);
        assert!("huge".parse::<CompanySize>().is_err());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = FundingCatalog::new(vec![]);
        let guidance = catalog.recommend(&FundingRequest::new(CompanySize::Large)).unwrap();
        assert!(guidance.programs.is_empty());
    }
}
