// Team registry: find-or-create lookup of teams by name.

use std::collections::HashMap;

use tracing::debug;

use crate::team::Team;

/// Handle to a team owned by a [`TeamRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(usize);

/// Owns every team seen so far, in first-seen order.
#[derive(Debug, Default)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    by_name: HashMap<String, TeamId>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `name`, registering a new team if it has not been seen.
    /// Names are case-sensitive.
    pub fn find_or_create(&mut self, name: &str) -> TeamId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = TeamId(self.teams.len());
        debug!("Registered team '{}'", name);
        self.teams.push(Team::new(name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<TeamId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }

    pub fn get_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.0]
    }

    pub fn by_name(&self, name: &str) -> Option<&Team> {
        self.id_of(name).map(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_or_create_returns_existing_team() {
        let mut registry = TeamRegistry::new();
        let x = registry.find_or_create("X");
        let a = registry.find_or_create("A");
        assert_eq!(registry.find_or_create("A"), a);
        assert_ne!(a, x);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).name(), "A");
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut registry = TeamRegistry::new();
        let lower = registry.find_or_create("aptos fc");
        let upper = registry.find_or_create("Aptos FC");
        assert_ne!(lower, upper);
        assert!(registry.by_name("APTOS FC").is_none());
    }

    #[test]
    fn iterates_in_first_seen_order() {
        let mut registry = TeamRegistry::new();
        for name in ["C", "A", "B", "A"] {
            registry.find_or_create(name);
        }
        let names: Vec<&str> = registry.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
