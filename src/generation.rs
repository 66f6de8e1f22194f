//! Catalog ranges a target can be drawn from.
//!
//! Each generation covers every Pokémon id from 1 up to the last one
//! introduced by that generation, so later generations include the earlier
//! ones.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation {
    pub id: u8,
    pub name: &'static str,
    pub region: &'static str,
    pub start_id: u32,
    pub end_id: u32,
    pub description: &'static str,
}

pub const GENERATIONS: [Generation; 9] = [
    Generation {
        id: 1,
        name: "Generation I",
        region: "Kanto",
        start_id: 1,
        end_id: 151,
        description: "The first 151 Pokémon (Red, Blue, Yellow)",
    },
    Generation {
        id: 2,
        name: "Generation II",
        region: "Johto",
        start_id: 1,
        end_id: 251,
        description: "The first 251 Pokémon (Gold, Silver, Crystal)",
    },
    Generation {
        id: 3,
        name: "Generation III",
        region: "Hoenn",
        start_id: 1,
        end_id: 386,
        description: "The first 386 Pokémon (Ruby, Sapphire, Emerald)",
    },
    Generation {
        id: 4,
        name: "Generation IV",
        region: "Sinnoh",
        start_id: 1,
        end_id: 493,
        description: "The first 493 Pokémon (Diamond, Pearl, Platinum)",
    },
    Generation {
        id: 5,
        name: "Generation V",
        region: "Unova",
        start_id: 1,
        end_id: 649,
        description: "The first 649 Pokémon (Black, White, Black 2, White 2)",
    },
    Generation {
        id: 6,
        name: "Generation VI",
        region: "Kalos",
        start_id: 1,
        end_id: 721,
        description: "The first 721 Pokémon (X, Y, Omega Ruby, Alpha Sapphire)",
    },
    Generation {
        id: 7,
        name: "Generation VII",
        region: "Alola",
        start_id: 1,
        end_id: 809,
        description: "The first 809 Pokémon (Sun, Moon, Ultra Sun, Ultra Moon)",
    },
    Generation {
        id: 8,
        name: "Generation VIII",
        region: "Galar",
        start_id: 1,
        end_id: 905,
        description: "The first 905 Pokémon (Sword, Shield, Legends: Arceus)",
    },
    Generation {
        id: 9,
        name: "Generation IX",
        region: "Paldea",
        start_id: 1,
        end_id: 1025,
        description: "Every Pokémon (Scarlet, Violet, DLC)",
    },
];

pub const DEFAULT_GENERATION: Generation = GENERATIONS[0];

impl Default for Generation {
    fn default() -> Self {
        DEFAULT_GENERATION
    }
}

impl Generation {
    #[must_use]
    pub fn by_id(id: u8) -> Option<Self> {
        GENERATIONS.iter().copied().find(|g| g.id == id)
    }

    /// Number of ids in the range; zero for a malformed range.
    #[must_use]
    pub fn len(&self) -> u32 {
        if self.end_id < self.start_id {
            0
        } else {
            self.end_id - self.start_id + 1
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, pokemon_id: u32) -> bool {
        (self.start_id..=self.end_id).contains(&pokemon_id)
    }

    /// Uniformly random id inside the range, or `None` if the range is empty.
    pub fn random_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        Some(rng.gen_range(self.start_id..=self.end_id))
    }

    /// Next generation in the catalog, wrapping around after the last one.
    #[must_use]
    pub fn next(&self) -> Self {
        let index = self.catalog_index();
        GENERATIONS[(index + 1) % GENERATIONS.len()]
    }

    #[must_use]
    pub fn previous(&self) -> Self {
        let index = self.catalog_index();
        GENERATIONS[(index + GENERATIONS.len() - 1) % GENERATIONS.len()]
    }

    fn catalog_index(&self) -> usize {
        GENERATIONS
            .iter()
            .position(|g| g.id == self.id)
            .unwrap_or(0)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_is_first_generation() {
        assert_eq!(Generation::default().id, 1);
        assert_eq!(DEFAULT_GENERATION.end_id, 151);
    }

    #[test]
    fn test_by_id() {
        assert_eq!(Generation::by_id(9).map(|g| g.end_id), Some(1025));
        assert_eq!(Generation::by_id(0), None);
        assert_eq!(Generation::by_id(10), None);
    }

    #[test]
    fn test_ranges_grow() {
        for pair in GENERATIONS.windows(2) {
            assert!(pair[1].end_id > pair[0].end_id);
            assert_eq!(pair[1].start_id, 1);
        }
    }

    #[test]
    fn test_random_id_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let kanto = DEFAULT_GENERATION;
        for _ in 0..500 {
            let id = kanto.random_id(&mut rng).unwrap();
            assert!(kanto.contains(id), "{id} outside Kanto");
        }
    }

    #[test]
    fn test_empty_range() {
        let broken = Generation {
            start_id: 10,
            end_id: 5,
            ..DEFAULT_GENERATION
        };
        assert!(broken.is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(broken.random_id(&mut rng), None);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let first = GENERATIONS[0];
        let last = GENERATIONS[8];
        assert_eq!(first.next().id, 2);
        assert_eq!(last.next().id, 1);
        assert_eq!(first.previous().id, 9);
        assert_eq!(last.previous().id, 8);
    }

    #[test]
    fn test_display() {
        assert_eq!(DEFAULT_GENERATION.to_string(), "Generation I (Kanto)");
    }
}
