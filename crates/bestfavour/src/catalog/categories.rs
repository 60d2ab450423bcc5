use serde::Serialize;

/// Category slugs that have a listing page.
pub const LISTING_CATEGORIES: [&str; 8] = [
    "house-cleaning",
    "plumbing",
    "electrical",
    "landscaping",
    "moving",
    "handyman",
    "painting",
    "pest-control",
];

/// Validated category route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Accepts a raw route parameter. Matching is case-insensitive.
    pub fn parse(raw: Option<&str>) -> Result<Self, CategoryError> {
        let slug = raw
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty())
            .ok_or(CategoryError::Missing)?;

        if LISTING_CATEGORIES.contains(&slug.as_str()) {
            Ok(Self(slug))
        } else {
            Err(CategoryError::Unknown(slug))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `pest-control` becomes `Pest Control`.
    pub fn title(&self) -> String {
        self.0
            .split('-')
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Route parameter failures. The messages are shown inline on the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("Category is required")]
    Missing,
    #[error("Invalid category")]
    Unknown(String),
}

/// Entry in the browsable category directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub subcategories: Vec<&'static str>,
}

impl ServiceCategory {
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .subcategories
                .iter()
                .any(|sub| sub.to_lowercase().contains(needle))
    }
}

/// Browsable category tree.
#[derive(Debug, Clone)]
pub struct CategoryDirectory {
    categories: Vec<ServiceCategory>,
}

impl CategoryDirectory {
    pub fn standard() -> Self {
        let entry = |id, title, description, subcategories: [&'static str; 5]| ServiceCategory {
            id,
            title,
            description,
            subcategories: subcategories.to_vec(),
        };

        Self {
            categories: vec![
                entry(
                    "home-services",
                    "Home Services",
                    "Cleaning, repairs, moving, and other household services",
                    ["Cleaning", "Plumbing", "Electrical", "Moving", "Gardening"],
                ),
                entry(
                    "maintenance",
                    "Home Maintenance",
                    "Home repairs, renovations, and improvements",
                    ["Repairs", "Painting", "Carpentry", "HVAC", "Roofing"],
                ),
                entry(
                    "beauty",
                    "Beauty & Wellness",
                    "Beauty treatments, spa services, and personal care",
                    ["Hair Styling", "Makeup", "Massage", "Nail Care", "Spa"],
                ),
                entry(
                    "automotive",
                    "Automotive",
                    "Car maintenance, repairs, and detailing services",
                    ["Repairs", "Maintenance", "Detailing", "Towing", "Inspection"],
                ),
                entry(
                    "tech",
                    "Tech Support",
                    "Computer repairs, IT support, and digital services",
                    [
                        "Computer Repair",
                        "IT Support",
                        "Phone Repair",
                        "Network Setup",
                        "Data Recovery",
                    ],
                ),
                entry(
                    "education",
                    "Education & Tutoring",
                    "Private tutoring, lessons, and educational support",
                    ["Academic", "Languages", "Music", "Art", "Test Prep"],
                ),
                entry(
                    "health",
                    "Health & Fitness",
                    "Personal training, fitness classes, and health services",
                    [
                        "Personal Training",
                        "Yoga",
                        "Nutrition",
                        "Physical Therapy",
                        "Mental Health",
                    ],
                ),
                entry(
                    "pets",
                    "Pet Services",
                    "Pet sitting, grooming, and animal care services",
                    ["Pet Sitting", "Dog Walking", "Grooming", "Training", "Veterinary"],
                ),
                entry(
                    "events",
                    "Event Services",
                    "Photography, entertainment, and event planning",
                    ["Photography", "Videography", "DJ Services", "Planning", "Decoration"],
                ),
            ],
        }
    }

    pub fn all(&self) -> &[ServiceCategory] {
        &self.categories
    }

    /// Case-insensitive search over title, description, and subcategories.
    pub fn search(&self, query: &str) -> Vec<&ServiceCategory> {
        let needle = query.trim().to_lowercase();
        self.categories
            .iter()
            .filter(|category| needle.is_empty() || category.matches_lowercase(&needle))
            .collect()
    }
}
