use serde::Serialize;

/// Featured provider card shown on the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSummary {
    pub name: String,
    pub category: String,
    pub rating: f32,
    pub location: String,
}

impl ProviderSummary {
    /// Avatar fallback, e.g. `Sipho Ndlovu` -> `SN`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    providers: Vec<ProviderSummary>,
}

impl ProviderDirectory {
    pub fn new(providers: Vec<ProviderSummary>) -> Self {
        Self { providers }
    }

    pub fn standard() -> Self {
        let provider = |name: &str, category: &str, rating: f32, location: &str| ProviderSummary {
            name: name.to_string(),
            category: category.to_string(),
            rating,
            location: location.to_string(),
        };

        Self::new(vec![
            provider("John Smith", "Electrician", 4.8, "Cape Town"),
            provider("Sarah Johnson", "House Cleaner", 4.7, "Johannesburg"),
            provider("Lerato Molefe", "Plumber", 4.6, "Pretoria"),
            provider("Sipho Ndlovu", "Carpenter", 4.9, "Durban"),
            provider("David Ndlovu", "Personal Trainer", 4.9, "Cape Town"),
            provider("Maria Santos", "Makeup Artist", 4.8, "Johannesburg"),
        ])
    }

    /// Highest rated first; equal ratings keep directory order.
    pub fn popular(&self, limit: usize) -> Vec<ProviderSummary> {
        let mut ranked = self.providers.clone();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popular_ranks_by_rating_and_respects_limit() {
        let directory = ProviderDirectory::standard();
        let names: Vec<_> = directory
            .popular(3)
            .into_iter()
            .map(|provider| provider.name)
            .collect();
        assert_eq!(names, vec!["Sipho Ndlovu", "David Ndlovu", "John Smith"]);
        assert!(directory.popular(0).is_empty());
    }

    #[test]
    fn initials_take_first_letter_of_each_name() {
        let provider = ProviderDirectory::standard().popular(1).remove(0);
        assert_eq!(provider.initials(), "SN");
    }
}
