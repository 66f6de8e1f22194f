//! The entity being guessed and the capability that supplies it.

use crate::error::ProviderError;
use crate::generation::Generation;
use async_trait::async_trait;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub base_stat: u32,
}

/// A target fetched from the catalog. Immutable once built; a new session
/// replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub id: u32,
    /// Canonical catalog name, e.g. `pikachu`.
    pub name: String,
    /// Localized name the player has to guess.
    pub display_name: String,
    pub sprites: Sprites,
    pub types: Vec<String>,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub stats: Vec<Stat>,
}

impl Target {
    /// Builds a target with only a name, mostly useful for tests and demos.
    #[must_use]
    pub fn named(id: u32, name: &str, display_name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
            sprites: Sprites::default(),
            types: Vec::new(),
            height: 0,
            weight: 0,
            stats: Vec::new(),
        }
    }

    #[must_use]
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }

    /// Length of the name to guess, in characters.
    #[must_use]
    pub fn name_len(&self) -> usize {
        self.display_name.chars().count()
    }
}

/// Supplies a random target for a generation.
#[async_trait]
pub trait TargetProvider: Send + Sync {
    async fn fetch_random_target(&self, generation: &Generation) -> Result<Target, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        let mut pikachu = Target::named(25, "pikachu", "Pikachu");
        pikachu.height = 4;
        pikachu.weight = 60;
        assert!((pikachu.height_m() - 0.4).abs() < f64::EPSILON);
        assert!((pikachu.weight_kg() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_name_len_counts_chars() {
        let eevee = Target::named(133, "eevee", "Évoli");
        assert_eq!(eevee.name_len(), 5);
        assert_eq!(eevee.image_url(), None);
    }
}
