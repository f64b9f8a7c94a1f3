use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of page section kinds a block can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Navbar,
    HeroSection,
    TrustLogos,
    BenefitsGrid,
    ProcessSteps,
    FeatureZigZag,
    PricingTable,
    TestimonialGrid,
    FaqAccordion,
    FinalCta,
    Footer,
    ListingGrid,
    MenuSection,
    BeforeAfterSlider,
    TeamGrid,
    MasonryGallery,
}

impl BlockType {
    /// Every block type, in palette order
    pub const ALL: [BlockType; 16] = [
        BlockType::Navbar,
        BlockType::HeroSection,
        BlockType::TrustLogos,
        BlockType::BenefitsGrid,
        BlockType::ProcessSteps,
        BlockType::FeatureZigZag,
        BlockType::PricingTable,
        BlockType::TestimonialGrid,
        BlockType::FaqAccordion,
        BlockType::FinalCta,
        BlockType::Footer,
        BlockType::ListingGrid,
        BlockType::MenuSection,
        BlockType::BeforeAfterSlider,
        BlockType::TeamGrid,
        BlockType::MasonryGallery,
    ];

    /// Wire tag, as stored in the document's `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Navbar => "navbar",
            BlockType::HeroSection => "heroSection",
            BlockType::TrustLogos => "trustLogos",
            BlockType::BenefitsGrid => "benefitsGrid",
            BlockType::ProcessSteps => "processSteps",
            BlockType::FeatureZigZag => "featureZigZag",
            BlockType::PricingTable => "pricingTable",
            BlockType::TestimonialGrid => "testimonialGrid",
            BlockType::FaqAccordion => "faqAccordion",
            BlockType::FinalCta => "finalCta",
            BlockType::Footer => "footer",
            BlockType::ListingGrid => "listingGrid",
            BlockType::MenuSection => "menuSection",
            BlockType::BeforeAfterSlider => "beforeAfterSlider",
            BlockType::TeamGrid => "teamGrid",
            BlockType::MasonryGallery => "masonryGallery",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CommonError::UnknownBlockType(s.to_string()))
    }
}
