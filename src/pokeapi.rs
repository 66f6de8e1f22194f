//! HTTP target provider backed by PokeAPI.
//!
//! A target takes two requests: `pokemon/{id}` for the sprites and metadata,
//! then `pokemon-species/{id}` for the localized name.

use crate::error::ProviderError;
use crate::generation::Generation;
use crate::target::{Sprites, Stat, Target, TargetProvider};
use crate::{debug_log, info_log};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LANGUAGE: &str = "fr";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    sprites: SpritesResponse,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    stats: Vec<StatSlot>,
}

#[derive(Debug, Default, Deserialize)]
struct SpritesResponse {
    front_default: Option<String>,
    back_default: Option<String>,
    front_shiny: Option<String>,
    back_shiny: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct SpeciesResponse {
    #[serde(default)]
    names: Vec<LocalizedName>,
}

#[derive(Debug, Deserialize)]
struct LocalizedName {
    name: String,
    language: NamedResource,
}

/// Picks the species name for `language`, if the catalog has one.
fn localized_name<'a>(names: &'a [LocalizedName], language: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|n| n.language.name == language)
        .map(|n| n.name.as_str())
        .filter(|n| !n.trim().is_empty())
}

fn build_target(pokemon: PokemonResponse, species: &SpeciesResponse, language: &str) -> Target {
    let display_name = localized_name(&species.names, language)
        .map_or_else(|| pokemon.name.clone(), str::to_string);

    Target {
        id: pokemon.id,
        name: pokemon.name,
        display_name,
        sprites: Sprites {
            front_default: pokemon.sprites.front_default,
            back_default: pokemon.sprites.back_default,
            front_shiny: pokemon.sprites.front_shiny,
            back_shiny: pokemon.sprites.back_shiny,
        },
        types: pokemon.types.into_iter().map(|t| t.kind.name).collect(),
        height: pokemon.height,
        weight: pokemon.weight,
        stats: pokemon
            .stats
            .into_iter()
            .map(|s| Stat {
                name: s.stat.name,
                base_stat: s.base_stat,
            })
            .collect(),
    }
}

pub struct PokeApiProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl PokeApiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, resource: &str, id: u32) -> String {
        format!("{}/{resource}/{id}", self.config.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ProviderError> {
        debug_log!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ProviderError::Decode { url, source })
    }

    /// Fetches one specific Pokémon by id.
    pub async fn fetch_target(&self, pokemon_id: u32) -> Result<Target, ProviderError> {
        let pokemon: PokemonResponse = self.get_json(self.url("pokemon", pokemon_id)).await?;
        let species: SpeciesResponse = self
            .get_json(self.url("pokemon-species", pokemon_id))
            .await?;
        let target = build_target(pokemon, &species, &self.config.language);
        info_log!(
            "Fetched target #{} ({} / {})",
            target.id,
            target.name,
            target.display_name
        );
        Ok(target)
    }
}

#[async_trait]
impl TargetProvider for PokeApiProvider {
    async fn fetch_random_target(&self, generation: &Generation) -> Result<Target, ProviderError> {
        let pokemon_id = {
            let mut rng = rand::thread_rng();
            generation.random_id(&mut rng)
        };
        let Some(pokemon_id) = pokemon_id else {
            return Err(ProviderError::EmptyRange {
                generation: generation.name.to_string(),
            });
        };
        log::info!("Drawing #{pokemon_id} from {generation}");
        self.fetch_target(pokemon_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIKACHU_JSON: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "sprites": {
            "front_default": "https://example.com/pikachu.png",
            "back_default": "https://example.com/pikachu-back.png",
            "front_shiny": null,
            "back_shiny": null,
            "other": {}
        },
        "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }],
        "height": 4,
        "weight": 60,
        "stats": [{ "base_stat": 35, "effort": 0, "stat": { "name": "hp", "url": "" } }],
        "abilities": []
    }"#;

    const SPECIES_JSON: &str = r#"{
        "names": [
            { "language": { "name": "fr" }, "name": "Pikachu" },
            { "language": { "name": "ja" }, "name": "ピカチュウ" }
        ]
    }"#;

    fn parse() -> (PokemonResponse, SpeciesResponse) {
        (
            serde_json::from_str(PIKACHU_JSON).unwrap(),
            serde_json::from_str(SPECIES_JSON).unwrap(),
        )
    }

    #[test]
    fn test_build_target_uses_localized_name() {
        let (pokemon, species) = parse();
        let target = build_target(pokemon, &species, "fr");
        assert_eq!(target.id, 25);
        assert_eq!(target.name, "pikachu");
        assert_eq!(target.display_name, "Pikachu");
        assert_eq!(target.types, vec!["electric".to_string()]);
        assert_eq!(target.image_url(), Some("https://example.com/pikachu.png"));
        assert_eq!(target.sprites.front_shiny, None);
        assert_eq!(target.stats[0].name, "hp");
        assert_eq!(target.stats[0].base_stat, 35);
    }

    #[test]
    fn test_missing_language_falls_back_to_canonical_name() {
        let (pokemon, species) = parse();
        let target = build_target(pokemon, &species, "de");
        assert_eq!(target.display_name, "pikachu");
    }

    #[test]
    fn test_blank_localized_name_falls_back() {
        let (pokemon, _) = parse();
        let species: SpeciesResponse =
            serde_json::from_str(r#"{ "names": [{ "language": { "name": "fr" }, "name": " " }] }"#)
                .unwrap();
        assert_eq!(build_target(pokemon, &species, "fr").display_name, "pikachu");
    }

    #[test]
    fn test_minimal_payload_decodes() {
        let pokemon: PokemonResponse =
            serde_json::from_str(r#"{ "id": 1, "name": "bulbasaur" }"#).unwrap();
        let species: SpeciesResponse = serde_json::from_str("{}").unwrap();
        let target = build_target(pokemon, &species, "fr");
        assert_eq!(target.display_name, "bulbasaur");
        assert!(target.types.is_empty());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let provider = PokeApiProvider::new(ProviderConfig {
            base_url: "http://localhost:9/api/".to_string(),
            ..ProviderConfig::default()
        })
        .unwrap();
        assert_eq!(
            provider.url("pokemon-species", 133),
            "http://localhost:9/api/pokemon-species/133"
        );
    }

    #[tokio::test]
    async fn test_empty_generation_is_an_error() {
        let provider = PokeApiProvider::new(ProviderConfig::default()).unwrap();
        let broken = Generation {
            start_id: 2,
            end_id: 1,
            ..Generation::default()
        };
        let result = provider.fetch_random_target(&broken).await;
        assert!(matches!(result, Err(ProviderError::EmptyRange { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_request_error() {
        let provider = PokeApiProvider::new(ProviderConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
            ..ProviderConfig::default()
        })
        .unwrap();
        let result = provider.fetch_target(25).await;
        assert!(matches!(result, Err(ProviderError::Request { .. })));
    }
}
