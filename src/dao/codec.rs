//! Translation between the in-memory [`GameState`] and the remote [`StorageRecord`] row.

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::dao::models::{Column, GameState, Identity, StorageRecord};

/// A stored row lacks a numeric column needed to rebuild a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stored record for `{user_id}` is missing required field `{field}`")]
pub struct MalformedRecordError {
    pub user_id: Identity,
    pub field: &'static str,
}

/// Build the row for `identity`, stamping `updated_at` with the current UTC time.
pub fn to_record(state: &GameState, identity: &Identity) -> StorageRecord {
    to_record_at(state, identity, OffsetDateTime::now_utc())
}

/// Build the row for `identity` with an explicit modification time.
pub fn to_record_at(
    state: &GameState,
    identity: &Identity,
    updated_at: OffsetDateTime,
) -> StorageRecord {
    StorageRecord {
        user_id: identity.clone(),
        bread: Some(Some(state.bread)),
        total_bread: Some(Some(state.total_bread)),
        bread_per_click: Some(Some(state.bread_per_click)),
        bread_per_second: Some(Some(state.bread_per_second)),
        prestige_level: Some(Some(state.prestige_level)),
        prestige_multiplier: Some(Some(state.prestige_multiplier)),
        player_level: Some(Some(state.player_level)),
        experience: Some(Some(state.experience)),
        upgrades: state.upgrades.clone(),
        shop_items: state.shop.clone(),
        // BTreeSet iteration is sorted, so the stored order is stable across saves.
        achievements: state.achievements.iter().cloned().collect(),
        stats: state.stats.clone(),
        updated_at: Some(format_timestamp(updated_at)),
    }
}

/// Rebuild a [`GameState`] from a stored row.
///
/// Fails if any numeric column is absent from the row; the caller gets either
/// a complete state or nothing. A column that is present but `null` takes its
/// new-game value: `1` for `bread_per_click`, `prestige_multiplier` and
/// `player_level`, `0` for the rest.
pub fn to_state(record: StorageRecord) -> Result<GameState, MalformedRecordError> {
    let id = &record.user_id;

    Ok(GameState {
        bread: required(record.bread, 0.0, id, "bread")?,
        total_bread: required(record.total_bread, 0.0, id, "total_bread")?,
        bread_per_click: required(record.bread_per_click, 1.0, id, "bread_per_click")?,
        bread_per_second: required(record.bread_per_second, 0.0, id, "bread_per_second")?,
        prestige_level: required(record.prestige_level, 0, id, "prestige_level")?,
        prestige_multiplier: required(record.prestige_multiplier, 1.0, id, "prestige_multiplier")?,
        player_level: required(record.player_level, 1, id, "player_level")?,
        experience: required(record.experience, 0.0, id, "experience")?,
        upgrades: record.upgrades,
        shop: record.shop_items,
        achievements: record.achievements.into_iter().collect(),
        stats: record.stats,
    })
}

fn required<T>(
    value: Column<T>,
    when_null: T,
    user_id: &Identity,
    field: &'static str,
) -> Result<T, MalformedRecordError> {
    value
        .map(|value| value.unwrap_or(when_null))
        .ok_or_else(|| MalformedRecordError {
            user_id: user_id.clone(),
            field,
        })
}

fn format_timestamp(time: OffsetDateTime) -> String {
    time.format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use time::macros::datetime;

    fn sample_state() -> GameState {
        GameState {
            bread: 50.0,
            total_bread: 500.0,
            bread_per_click: 2.0,
            bread_per_second: 0.5,
            prestige_level: 1,
            prestige_multiplier: 1.5,
            player_level: 3,
            experience: 42.0,
            upgrades: IndexMap::from([("oven".to_string(), 2)]),
            shop: IndexMap::from([("golden_rolling_pin".to_string(), json!({"owned": true}))]),
            achievements: ["first_loaf".to_string()].into_iter().collect(),
            stats: IndexMap::from([("clicks".to_string(), json!(120))]),
        }
    }

    #[test]
    fn renames_fields_into_storage_shape() {
        let record = to_record_at(
            &sample_state(),
            &Identity::new("player-1"),
            datetime!(2024-05-01 12:00 UTC),
        );

        assert_eq!(record.user_id.as_str(), "player-1");
        assert_eq!(record.bread, Some(Some(50.0)));
        assert_eq!(record.total_bread, Some(Some(500.0)));
        assert_eq!(record.bread_per_click, Some(Some(2.0)));
        assert_eq!(record.achievements, vec!["first_loaf".to_string()]);
        assert_eq!(record.shop_items["golden_rolling_pin"], json!({"owned": true}));
        assert_eq!(record.updated_at.as_deref(), Some("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn duplicate_achievements_collapse_on_decode() {
        let mut record = to_record(&sample_state(), &Identity::new("player-1"));
        record.achievements = vec!["b".into(), "a".into(), "b".into()];

        let state = to_state(record).unwrap();
        assert_eq!(state.achievements.len(), 2);
        assert!(state.achievements.contains("a"));
        assert!(state.achievements.contains("b"));
    }

    #[test]
    fn missing_numeric_column_is_rejected() {
        let mut record = to_record(&sample_state(), &Identity::new("player-1"));
        record.experience = None;

        let err = to_state(record).unwrap_err();
        assert_eq!(err.field, "experience");
        assert_eq!(err.user_id, Identity::new("player-1"));
    }

    #[test]
    fn null_numeric_columns_keep_the_rest_of_the_save() {
        let record: StorageRecord = serde_json::from_value(json!({
            "user_id": "player-1",
            "bread": 1234, "total_bread": 99999, "bread_per_click": null, "bread_per_second": 3,
            "prestige_level": 2, "prestige_multiplier": null, "player_level": null,
            "experience": null, "achievements": ["first_loaf"]
        }))
        .unwrap();

        let state = to_state(record).unwrap();
        assert_eq!(state.bread, 1234.0);
        assert_eq!(state.total_bread, 99999.0);
        assert_eq!(state.prestige_level, 2);
        assert_eq!(state.experience, 0.0);
        assert_eq!(state.bread_per_click, 1.0);
        assert_eq!(state.prestige_multiplier, 1.0);
        assert_eq!(state.player_level, 1);
        assert!(state.achievements.contains("first_loaf"));
    }

    #[test]
    fn empty_open_ended_columns_decode_to_empty_maps() {
        let record: StorageRecord = serde_json::from_value(json!({
            "user_id": "player-1",
            "bread": 0, "total_bread": 0, "bread_per_click": 1, "bread_per_second": 0,
            "prestige_level": 0, "prestige_multiplier": 1, "player_level": 1, "experience": 0,
            "upgrades": null, "shop_items": null, "achievements": null, "stats": null
        }))
        .unwrap();

        let state = to_state(record).unwrap();
        assert!(state.upgrades.is_empty());
        assert!(state.shop.is_empty());
        assert!(state.stats.is_empty());
    }

    fn finite() -> impl Strategy<Value = f64> {
        -1.0e12..1.0e12f64
    }

    prop_compose! {
        fn arb_state()(
            counters in proptest::collection::vec(finite(), 6),
            prestige_level in any::<u32>(),
            player_level in any::<u32>(),
            upgrades in proptest::collection::vec(("[a-z_]{1,8}", any::<u32>()), 0..5),
            shop in proptest::collection::vec(("[a-z_]{1,8}", any::<bool>()), 0..5),
            achievements in proptest::collection::btree_set("[a-z_]{1,12}", 0..8),
            stats in proptest::collection::vec(("[a-z_]{1,8}", any::<i64>()), 0..5),
        ) -> GameState {
            GameState {
                bread: counters[0],
                total_bread: counters[1],
                bread_per_click: counters[2],
                bread_per_second: counters[3],
                prestige_level,
                prestige_multiplier: counters[4],
                player_level,
                experience: counters[5],
                upgrades: upgrades.into_iter().collect(),
                shop: shop.into_iter().map(|(k, owned)| (k, json!({ "owned": owned }))).collect(),
                achievements,
                stats: stats.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }
        }
    }

    proptest! {
        #[test]
        fn record_round_trips_back_to_state(state in arb_state(), id in "[a-z0-9-]{1,36}") {
            let decoded = to_state(to_record(&state, &Identity::new(id))).unwrap();
            prop_assert_eq!(decoded, state);
        }
    }
}
