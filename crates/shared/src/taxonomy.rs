use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level classification of an assessment's subject area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "IT")]
    It,
    Healthcare,
    Finance,
}

impl Sector {
    pub const ALL: [Sector; 3] = [Sector::It, Sector::Healthcare, Sector::Finance];

    pub fn label(self) -> &'static str {
        match self {
            Sector::It => "IT",
            Sector::Healthcare => "Healthcare",
            Sector::Finance => "Finance",
        }
    }

    /// Domains that may be chosen while this sector is selected, in display order.
    pub fn domains(self) -> &'static [Domain] {
        match self {
            Sector::It => &[Domain::SoftwareDevelopment, Domain::Networking],
            Sector::Healthcare => &[Domain::Pharmacy, Domain::MedicalDevices],
            Sector::Finance => &[Domain::Banking, Domain::Investments],
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-classification within a sector. Each domain belongs to exactly one
/// sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "Software Development")]
    SoftwareDevelopment,
    Networking,
    Pharmacy,
    #[serde(rename = "Medical Devices")]
    MedicalDevices,
    Banking,
    Investments,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::SoftwareDevelopment,
        Domain::Networking,
        Domain::Pharmacy,
        Domain::MedicalDevices,
        Domain::Banking,
        Domain::Investments,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Domain::SoftwareDevelopment => "Software Development",
            Domain::Networking => "Networking",
            Domain::Pharmacy => "Pharmacy",
            Domain::MedicalDevices => "Medical Devices",
            Domain::Banking => "Banking",
            Domain::Investments => "Investments",
        }
    }

    pub fn sector(self) -> Sector {
        match self {
            Domain::SoftwareDevelopment | Domain::Networking => Sector::It,
            Domain::Pharmacy | Domain::MedicalDevices => Sector::Healthcare,
            Domain::Banking | Domain::Investments => Sector::Finance,
        }
    }

    /// Sub-domains that may be selected under this domain, in display order.
    pub fn sub_domains(self) -> &'static [SubDomain] {
        match self {
            Domain::SoftwareDevelopment => &[SubDomain::Frontend, SubDomain::Backend],
            Domain::Networking => &[SubDomain::Infrastructure, SubDomain::Security],
            Domain::Pharmacy => &[SubDomain::Pharmacology, SubDomain::Dispensary],
            Domain::MedicalDevices => &[SubDomain::Monitoring, SubDomain::Diagnostic],
            Domain::Banking => &[SubDomain::Retail, SubDomain::Corporate],
            Domain::Investments => &[SubDomain::Stocks, SubDomain::Bonds],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fine-grained topic within a domain. Sections may select several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubDomain {
    Frontend,
    Backend,
    Infrastructure,
    Security,
    Pharmacology,
    Dispensary,
    Monitoring,
    Diagnostic,
    Retail,
    Corporate,
    Stocks,
    Bonds,
}

impl SubDomain {
    pub const ALL: [SubDomain; 12] = [
        SubDomain::Frontend,
        SubDomain::Backend,
        SubDomain::Infrastructure,
        SubDomain::Security,
        SubDomain::Pharmacology,
        SubDomain::Dispensary,
        SubDomain::Monitoring,
        SubDomain::Diagnostic,
        SubDomain::Retail,
        SubDomain::Corporate,
        SubDomain::Stocks,
        SubDomain::Bonds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubDomain::Frontend => "Frontend",
            SubDomain::Backend => "Backend",
            SubDomain::Infrastructure => "Infrastructure",
            SubDomain::Security => "Security",
            SubDomain::Pharmacology => "Pharmacology",
            SubDomain::Dispensary => "Dispensary",
            SubDomain::Monitoring => "Monitoring",
            SubDomain::Diagnostic => "Diagnostic",
            SubDomain::Retail => "Retail",
            SubDomain::Corporate => "Corporate",
            SubDomain::Stocks => "Stocks",
            SubDomain::Bonds => "Bonds",
        }
    }
}

impl fmt::Display for SubDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
