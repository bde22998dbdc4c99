// ~/privshield/src/catalog/mod.rs
//
// Static, ordered manifest of every setting the tool knows about.

mod apps;
mod bloatware;
mod cortana;
mod defender;
mod edge;
mod gaming;
mod privacy;
mod security;
mod updates;

use std::sync::Arc;

use crate::setting::Setting;
use crate::system::SystemHandles;
use crate::info;

pub struct Category {
    pub name: &'static str,
    pub settings: Vec<Arc<dyn Setting>>,
}

impl Category {
    fn new(name: &'static str, settings: Vec<Arc<dyn Setting>>) -> Self {
        Self { name, settings }
    }
}

pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn build(sys: &SystemHandles) -> Self {
        let categories = vec![
            Category::new("Privacy", privacy::settings(sys)),
            Category::new("Cortana", cortana::settings(sys)),
            Category::new("Bloatware", bloatware::settings(sys)),
            Category::new("App permissions", apps::settings(sys)),
            Category::new("Updates", updates::settings(sys)),
            Category::new("Gaming", gaming::settings(sys)),
            Category::new("Windows Defender", defender::settings(sys)),
            Category::new("Microsoft Edge", edge::settings(sys)),
            Category::new("Security", security::settings(sys)),
        ];

        let total: usize = categories.iter().map(|c| c.settings.len()).sum();
        info!("Catalog built: {} categories, {} settings", categories.len(), total);

        Self { categories }
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.settings.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn handles() -> SystemHandles {
        SystemHandles::simulated()
    }

    #[test]
    fn categories_in_fixed_order() {
        let catalog = Catalog::build(&handles());
        let names: Vec<&str> = catalog.categories.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "Privacy",
                "Cortana",
                "Bloatware",
                "App permissions",
                "Updates",
                "Gaming",
                "Windows Defender",
                "Microsoft Edge",
                "Security",
            ]
        );

        let counts: Vec<usize> = catalog.categories.iter().map(|c| c.settings.len()).collect();
        assert_eq!(counts, [20, 3, 2, 24, 3, 1, 1, 4, 2]);
        assert_eq!(catalog.len(), 60);
    }

    #[test]
    fn ids_unique_within_category() {
        let catalog = Catalog::build(&handles());
        for category in &catalog.categories {
            let mut seen = HashSet::new();
            for s in &category.settings {
                assert!(seen.insert(s.id()), "duplicate '{}' in {}", s.id(), category.name);
                assert!(!s.info().is_empty(), "'{}' has no description", s.id());
            }
        }
    }

    #[test]
    fn every_setting_round_trips_on_simulated_system() {
        let catalog = Catalog::build(&handles());
        for category in &catalog.categories {
            for s in &category.settings {
                assert!(s.check_state(), "{}: fresh system should need action", s.id());
                assert!(s.apply(), "{}: apply failed", s.id());
                assert!(!s.check_state(), "{}: still needs action after apply", s.id());
                assert!(s.apply(), "{}: second apply failed", s.id());
                assert!(s.revert(), "{}: revert failed", s.id());
                assert!(s.check_state(), "{}: protected after revert", s.id());
            }
        }
    }
}
