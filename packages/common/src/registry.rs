//! # Block Registry
//!
//! Static table of everything the builder knows about each block type:
//! palette metadata and the default properties a freshly added block
//! starts with.

use crate::block_type::BlockType;
use crate::document::Props;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Palette grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Layout,
    Content,
    Conversion,
    SocialProof,
    Sector,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Layout,
        Category::Content,
        Category::Conversion,
        Category::SocialProof,
        Category::Sector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Layout => "layout",
            Category::Content => "content",
            Category::Conversion => "conversion",
            Category::SocialProof => "social-proof",
            Category::Sector => "sector",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Invalid category: {}. Use one of: {}", s, names.join(", "))
            })
    }
}

/// Registry record for one block type
#[derive(Debug)]
pub struct RegistryEntry {
    pub block_type: BlockType,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Icon name shown in the palette
    pub icon: &'static str,
    defaults: fn() -> Value,
}

impl RegistryEntry {
    /// Properties a new block of this type starts with
    pub fn default_props(&self) -> Props {
        match (self.defaults)() {
            Value::Object(map) => map,
            _ => Props::new(),
        }
    }
}

// Ordered like the `BlockType` variants so lookup is an index.
static REGISTRY: [RegistryEntry; 16] = [
    RegistryEntry {
        block_type: BlockType::Navbar,
        name: "Navigation Bar",
        description: "Sticky navigation with logo, menu items, and CTA button",
        category: Category::Layout,
        icon: "Menu",
        defaults: || json!({ "sticky": true, "menuItems": [] }),
    },
    RegistryEntry {
        block_type: BlockType::HeroSection,
        name: "Hero Section",
        description: "Main hero with heading, subtext, buttons, and media",
        category: Category::Content,
        icon: "Layout",
        defaults: || {
            json!({
                "heading": "Your Amazing Headline",
                "subtext": "A compelling subtext that explains your value proposition",
                "alignment": "left"
            })
        },
    },
    RegistryEntry {
        block_type: BlockType::TrustLogos,
        name: "Trust Logos",
        description: "Display trusted partner or client logos",
        category: Category::SocialProof,
        icon: "Award",
        defaults: || {
            json!({
                "title": "Trusted by leading companies",
                "logos": [],
                "grayscale": true,
                "animated": true
            })
        },
    },
    RegistryEntry {
        block_type: BlockType::BenefitsGrid,
        name: "Benefits Grid",
        description: "3-column grid with icons, titles, and descriptions",
        category: Category::Content,
        icon: "Grid3x3",
        defaults: || json!({ "columns": 3, "items": [] }),
    },
    RegistryEntry {
        block_type: BlockType::ProcessSteps,
        name: "Process Steps",
        description: "Numbered steps showing a process or workflow",
        category: Category::Content,
        icon: "ListOrdered",
        defaults: || json!({ "showArrows": true, "variant": "horizontal", "steps": [] }),
    },
    RegistryEntry {
        block_type: BlockType::FeatureZigZag,
        name: "Feature Zig-Zag",
        description: "Alternating image and text feature sections",
        category: Category::Content,
        icon: "Columns",
        defaults: || json!({ "features": [] }),
    },
    RegistryEntry {
        block_type: BlockType::PricingTable,
        name: "Pricing Table",
        description: "Pricing plans with features comparison",
        category: Category::Conversion,
        icon: "DollarSign",
        defaults: || json!({ "plans": [] }),
    },
    RegistryEntry {
        block_type: BlockType::TestimonialGrid,
        name: "Testimonial Grid",
        description: "Customer testimonials with avatars and ratings",
        category: Category::SocialProof,
        icon: "Quote",
        defaults: || json!({ "columns": 3, "showRating": true, "testimonials": [] }),
    },
    RegistryEntry {
        block_type: BlockType::FaqAccordion,
        name: "FAQ Accordion",
        description: "Expandable frequently asked questions",
        category: Category::Content,
        icon: "HelpCircle",
        defaults: || json!({ "allowMultiple": false, "items": [] }),
    },
    RegistryEntry {
        block_type: BlockType::FinalCta,
        name: "Final CTA",
        description: "Large call-to-action section for page end",
        category: Category::Conversion,
        icon: "MousePointerClick",
        defaults: || json!({ "heading": "Ready to get started?", "backgroundStyle": "gradient" }),
    },
    RegistryEntry {
        block_type: BlockType::Footer,
        name: "Footer",
        description: "Site footer with links, social icons, and copyright",
        category: Category::Layout,
        icon: "PanelBottom",
        defaults: || json!({ "columns": [], "copyright": "© 2024 All rights reserved." }),
    },
    RegistryEntry {
        block_type: BlockType::ListingGrid,
        name: "Listing Grid",
        description: "Grid of items for galleries, real estate, products",
        category: Category::Sector,
        icon: "LayoutGrid",
        defaults: || json!({ "columns": 3, "items": [] }),
    },
    RegistryEntry {
        block_type: BlockType::MenuSection,
        name: "Menu Section",
        description: "Tabbed menu for restaurants or service lists",
        category: Category::Sector,
        icon: "UtensilsCrossed",
        defaults: || json!({ "layout": "tabs", "showImages": true, "categories": [] }),
    },
    RegistryEntry {
        block_type: BlockType::BeforeAfterSlider,
        name: "Before/After Slider",
        description: "Interactive image comparison slider",
        category: Category::Sector,
        icon: "SplitSquareHorizontal",
        defaults: || {
            json!({
                "defaultPosition": 50,
                "orientation": "horizontal",
                "beforeLabel": "Before",
                "afterLabel": "After"
            })
        },
    },
    RegistryEntry {
        block_type: BlockType::TeamGrid,
        name: "Team Grid",
        description: "Team member cards with photos and social links",
        category: Category::Sector,
        icon: "Users",
        defaults: || {
            json!({ "columns": 4, "showBio": true, "showSocialLinks": true, "members": [] })
        },
    },
    RegistryEntry {
        block_type: BlockType::MasonryGallery,
        name: "Masonry Gallery",
        description: "Masonry layout gallery with lightbox",
        category: Category::Sector,
        icon: "Image",
        defaults: || json!({ "columns": 3, "gap": "md", "enableLightbox": true, "images": [] }),
    },
];

/// Registry record for a block type
pub fn entry(block_type: BlockType) -> &'static RegistryEntry {
    &REGISTRY[block_type as usize]
}

/// All entries in palette order
pub fn entries() -> impl Iterator<Item = &'static RegistryEntry> {
    REGISTRY.iter()
}

pub fn by_category(category: Category) -> Vec<&'static RegistryEntry> {
    REGISTRY.iter().filter(|e| e.category == category).collect()
}

pub fn available_block_types() -> &'static [BlockType] {
    &BlockType::ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_indexed_by_block_type() {
        for block_type in BlockType::ALL {
            assert_eq!(entry(block_type).block_type, block_type);
        }
    }

    #[test]
    fn test_hero_defaults() {
        let props = entry(BlockType::HeroSection).default_props();
        let keys: Vec<&str> = props.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["heading", "subtext", "alignment"]);
        assert_eq!(props["heading"], "Your Amazing Headline");
    }

    #[test]
    fn test_defaults_never_carry_reserved_keys() {
        for e in entries() {
            let props = e.default_props();
            assert!(!props.contains_key("id"), "{} defaults contain id", e.name);
            assert!(!props.contains_key("type"), "{} defaults contain type", e.name);
        }
    }

    #[test]
    fn test_categories_cover_every_entry() {
        let total: usize = Category::ALL.iter().map(|c| by_category(*c).len()).sum();
        assert_eq!(total, BlockType::ALL.len());

        let sector: Vec<BlockType> = by_category(Category::Sector)
            .iter()
            .map(|e| e.block_type)
            .collect();
        assert_eq!(
            sector,
            vec![
                BlockType::ListingGrid,
                BlockType::MenuSection,
                BlockType::BeforeAfterSlider,
                BlockType::TeamGrid,
                BlockType::MasonryGallery,
            ]
        );
    }

    #[test]
    fn test_category_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Category::SocialProof).unwrap(),
            "\"social-proof\""
        );
        assert_eq!("social-proof".parse::<Category>(), Ok(Category::SocialProof));
        assert!("widgets".parse::<Category>().is_err());
    }
}
