//! Block type → React component table.
//!
//! Generated pages import each block's component from the host project's
//! `@/components/blocks/` directory.

use pagecraft_common::BlockType;

/// Component a block type renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentRef {
    pub name: &'static str,
    pub import_path: &'static str,
}

impl ComponentRef {
    const fn new(name: &'static str, import_path: &'static str) -> Self {
        Self { name, import_path }
    }

    pub fn import_statement(&self) -> String {
        format!("import {{ {} }} from \"{}\";", self.name, self.import_path)
    }
}

pub fn component_for(block_type: BlockType) -> ComponentRef {
    match block_type {
        BlockType::Navbar => ComponentRef::new("Navbar", "@/components/blocks/navbar"),
        BlockType::HeroSection => ComponentRef::new("HeroSection", "@/components/blocks/hero-section"),
        BlockType::TrustLogos => ComponentRef::new("TrustLogos", "@/components/blocks/trust-logos"),
        BlockType::BenefitsGrid => {
            ComponentRef::new("BenefitsGrid", "@/components/blocks/benefits-grid")
        }
        BlockType::ProcessSteps => {
            ComponentRef::new("ProcessSteps", "@/components/blocks/process-steps")
        }
        BlockType::FeatureZigZag => {
            ComponentRef::new("FeatureZigZag", "@/components/blocks/feature-zigzag")
        }
        BlockType::PricingTable => {
            ComponentRef::new("PricingTable", "@/components/blocks/pricing-table")
        }
        BlockType::TestimonialGrid => {
            ComponentRef::new("TestimonialGrid", "@/components/blocks/testimonial-grid")
        }
        BlockType::FaqAccordion => {
            ComponentRef::new("FaqAccordion", "@/components/blocks/faq-accordion")
        }
        BlockType::FinalCta => ComponentRef::new("FinalCTA", "@/components/blocks/final-cta"),
        BlockType::Footer => ComponentRef::new("Footer", "@/components/blocks/footer"),
        BlockType::ListingGrid => ComponentRef::new("ListingGrid", "@/components/blocks/listing-grid"),
        BlockType::MenuSection => ComponentRef::new("MenuSection", "@/components/blocks/menu-section"),
        BlockType::BeforeAfterSlider => {
            ComponentRef::new("BeforeAfterSlider", "@/components/blocks/before-after-slider")
        }
        BlockType::TeamGrid => ComponentRef::new("TeamGrid", "@/components/blocks/team-grid"),
        BlockType::MasonryGallery => {
            ComponentRef::new("MasonryGallery", "@/components/blocks/masonry-gallery")
        }
    }
}
