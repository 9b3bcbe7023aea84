//! Seed document loading from JSON.
//!
//! Feature-gated behind `data-loader`. The seed describes the initial
//! territory -- clans, their mine parameters, and roads -- and loads into a
//! ready-to-run [`Engine`]. Unlike event handling, seed loading is strict: a
//! malformed document, a duplicate clan, or a road naming an undeclared clan
//! is fatal, reported to the caller before anything downstream executes.

use crate::engine::Engine;
use crate::registry::MineSpec;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a seed document.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("duplicate clan '{0}' in seed")]
    DuplicateClan(String),
    #[error("road references undeclared clan '{0}'")]
    UnknownClanRef(String),
}

// ---------------------------------------------------------------------------
// JSON data structures
// ---------------------------------------------------------------------------

/// Top-level seed document.
#[derive(Debug, serde::Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub clans: Vec<ClanSeed>,
    #[serde(default)]
    pub roads: Vec<RoadSeed>,
}

/// One clan declaration. `mine` is absent for plain clans.
#[derive(Debug, serde::Deserialize)]
pub struct ClanSeed {
    pub name: String,
    #[serde(default)]
    pub mine: Option<MineSpec>,
}

/// One undirected road declaration.
#[derive(Debug, serde::Deserialize)]
pub struct RoadSeed {
    pub from: String,
    pub to: String,
    pub travel_time: u64,
}

// ---------------------------------------------------------------------------
// Loading functions
// ---------------------------------------------------------------------------

/// Load an engine from a seed JSON string.
pub fn load_seed_json(json: &str) -> Result<Engine, SeedError> {
    let data: SeedData = serde_json::from_str(json)?;
    build_engine(data)
}

/// Load an engine from seed JSON bytes.
pub fn load_seed_json_bytes(bytes: &[u8]) -> Result<Engine, SeedError> {
    let data: SeedData = serde_json::from_slice(bytes)?;
    build_engine(data)
}

fn build_engine(data: SeedData) -> Result<Engine, SeedError> {
    let mut engine = Engine::new();

    for clan in &data.clans {
        if engine.registry().id_of(&clan.name).is_some() {
            return Err(SeedError::DuplicateClan(clan.name.clone()));
        }
        match clan.mine {
            Some(spec) => engine.add_mine(&clan.name, spec),
            None => engine.add_clan(&clan.name),
        };
    }

    // Roads must reference declared clans; runtime NewClan events are the
    // only place implicit creation is allowed.
    for road in &data.roads {
        for endpoint in [&road.from, &road.to] {
            if engine.registry().id_of(endpoint).is_none() {
                return Err(SeedError::UnknownClanRef(endpoint.clone()));
            }
        }
        engine.add_road(&road.from, &road.to, road.travel_time);
    }

    Ok(engine)
}

// ===========================================================================
// Tests
// ===========================================================================
