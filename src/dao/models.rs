use std::{collections::BTreeSet, fmt};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{DefaultOnNull, serde_as, skip_serializing_none};
use utoipa::ToSchema;

/// Opaque handle for the signed-in player, issued by the external session provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wrap a provider-issued user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// In-memory progress of a single player, as produced by the game simulation.
///
/// This is also the exact JSON shape written to the local fallback snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Currency currently held.
    pub bread: f64,
    /// Currency earned over the lifetime of the save.
    pub total_bread: f64,
    /// Gain per manual action.
    pub bread_per_click: f64,
    /// Passive gain per tick.
    pub bread_per_second: f64,
    /// Number of prestige resets performed.
    pub prestige_level: u32,
    /// Multiplier granted by prestige.
    pub prestige_multiplier: f64,
    /// Player level.
    pub player_level: u32,
    /// Experience towards the next level.
    pub experience: f64,
    /// Owned count per upgrade id.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub upgrades: IndexMap<String, u32>,
    /// Opaque per-item shop state, keyed by shop item id.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub shop: IndexMap<String, Value>,
    /// Unlocked achievement ids.
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub achievements: BTreeSet<String>,
    /// Open-ended statistics record.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub stats: IndexMap<String, Value>,
}

/// Nullable database column: `None` when the key is absent from the row,
/// `Some(None)` when it is present but `null`.
pub type Column<T> = Option<Option<T>>;

/// Normalized row of the remote `game_saves` table, one per identity.
///
/// Numeric columns are [`Column`]s so that a row missing one of them can be
/// told apart from a zero value and from an explicit `null` when translating
/// back into a [`GameState`].
#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub user_id: Identity,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub bread: Column<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub total_bread: Column<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub bread_per_click: Column<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub bread_per_second: Column<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub prestige_level: Column<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub prestige_multiplier: Column<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub player_level: Column<u32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub experience: Column<f64>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub upgrades: IndexMap<String, u32>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub shop_items: IndexMap<String, Value>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub achievements: Vec<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub stats: IndexMap<String, Value>,
    /// RFC 3339 timestamp of the last write.
    pub updated_at: Option<String>,
}

/// Audit row appended to the remote `activity_logs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub user_id: Identity,
    pub action: String,
    pub details: Map<String, Value>,
}

/// Row of the remote `leaderboard` view.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Display name, when the view exposes one.
    #[serde(default)]
    pub username: Option<String>,
    /// Lifetime currency earned.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub total_bread: f64,
    /// Prestige resets performed.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub prestige_level: u32,
    /// Player level, when the view exposes it.
    #[serde(default)]
    pub player_level: Option<u32>,
    /// Any other columns the view returns.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
