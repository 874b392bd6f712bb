//! 進行状況のセーブ/ロード。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントする。
//!
//! `version` を持たない旧形式（ルート直下にフィールドが並ぶ JSON）も読み込む。
//! 読み込みはフィールド単位で行い、壊れたフィールドだけをデフォルト値に置き換える。

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{SeedId, UpgradeId};
use crate::config::EngineConfig;
use crate::error::StoreError;
use crate::games::farm::state::{BonusPlot, FarmPlot, Planting};
use crate::store::SaveStore;

/// セーブデータのフォーマットバージョン。
pub const SAVE_VERSION: u32 = 1;

/// 互換性を維持できる最小バージョン。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// キーバリューストアのキー。
pub const SAVE_KEY: &str = "priklyucheniya-stepana-save-v3";

/// The only persisted entity: everything that survives a restart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSnapshot {
    pub level: u32,
    pub coins: u64,
    pub purchased_upgrades: BTreeSet<UpgradeId>,
    pub equipped_cosmetics: BTreeSet<UpgradeId>,
    pub mood: u32,
    pub farm_plots: Vec<FarmPlot>,
    pub bonus_plot: BonusPlot,
}

impl SaveSnapshot {
    /// First-run progress.
    pub fn defaults(config: &EngineConfig) -> Self {
        Self {
            level: 1,
            coins: 0,
            purchased_upgrades: BTreeSet::new(),
            equipped_cosmetics: BTreeSet::new(),
            mood: config.mood.max,
            farm_plots: (0..config.farm.plots).map(FarmPlot::empty).collect(),
            bonus_plot: BonusPlot::default(),
        }
    }
}

// ── Wire format ───────────────────────────────────────────────

#[derive(Serialize)]
struct SaveData<'a> {
    version: u32,
    game: GameSave<'a>,
}

/// 書き出し専用。読み込みは [`merge`] がフィールド単位で行う。
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameSave<'a> {
    level: u32,
    coins: u64,
    purchased_upgrades: &'a BTreeSet<UpgradeId>,
    equipped_clothes: &'a BTreeSet<UpgradeId>,
    anastasia_mood: u32,
    farm_plots: Vec<PlotSave>,
    cucumber_plot: BonusSave,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct PlotSave {
    id: usize,
    seed_id: Option<SeedId>,
    plant_time: Option<u64>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct BonusSave {
    last_harvest_time: Option<u64>,
}

pub fn encode(snapshot: &SaveSnapshot) -> Result<String, StoreError> {
    let data = SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            level: snapshot.level,
            coins: snapshot.coins,
            purchased_upgrades: &snapshot.purchased_upgrades,
            equipped_clothes: &snapshot.equipped_cosmetics,
            anastasia_mood: snapshot.mood,
            farm_plots: snapshot
                .farm_plots
                .iter()
                .map(|p| PlotSave {
                    id: p.id,
                    seed_id: p.planting.map(|pl| pl.seed),
                    plant_time: p.planting.map(|pl| pl.planted_at),
                })
                .collect(),
            cucumber_plot: BonusSave {
                last_harvest_time: snapshot.bonus_plot.last_harvest,
            },
        },
    };
    Ok(serde_json::to_string(&data)?)
}

/// Why a stored record was thrown away.
#[derive(Debug, thiserror::Error)]
pub enum Discarded {
    #[error("save is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save is not a JSON object")]
    NotAnObject,
    #[error("save version {saved} is older than {min}")]
    TooOld { saved: u32, min: u32 },
}

pub fn decode(json: &str, config: &EngineConfig) -> Result<SaveSnapshot, Discarded> {
    let root: Value = serde_json::from_str(json)?;
    let root = root.as_object().ok_or(Discarded::NotAnObject)?;

    // `version` が無ければ旧形式: ルート自体がゲームデータ。
    let Some(version) = root.get("version") else {
        return Ok(merge(root, config));
    };
    let saved = version.as_u64().unwrap_or(0) as u32;
    if saved < MIN_COMPATIBLE_VERSION {
        return Err(Discarded::TooOld {
            saved,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    if saved < SAVE_VERSION {
        tracing::info!(saved, current = SAVE_VERSION, "migrating older save");
    }
    let game = root
        .get("game")
        .and_then(Value::as_object)
        .ok_or(Discarded::NotAnObject)?;
    Ok(merge(game, config))
}

/// Read one field, falling back to `None` when it is missing, null or the
/// wrong shape.
fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    let value = obj.get(key).filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed save field, using default");
            None
        }
    }
}

/// Unknown ids are skipped one by one instead of failing the whole list.
fn upgrade_set(obj: &Map<String, Value>, key: &str) -> BTreeSet<UpgradeId> {
    field::<Vec<Value>>(obj, key)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

fn merge(obj: &Map<String, Value>, config: &EngineConfig) -> SaveSnapshot {
    let defaults = SaveSnapshot::defaults(config);

    let level = field::<u32>(obj, "level")
        .filter(|&l| l > 0)
        .unwrap_or(defaults.level);
    let coins = field(obj, "coins").unwrap_or(defaults.coins);
    let mood = field::<u32>(obj, "anastasiaMood")
        .unwrap_or(defaults.mood)
        .min(config.mood.max);

    let purchased_upgrades = upgrade_set(obj, "purchasedUpgrades");
    let equipped_cosmetics = upgrade_set(obj, "equippedClothes");

    let saved_plots = field::<Vec<Value>>(obj, "farmPlots").unwrap_or_default();
    let farm_plots = (0..config.farm.plots)
        .map(|id| {
            let saved = saved_plots
                .get(id)
                .and_then(|v| serde_json::from_value::<PlotSave>(v.clone()).ok())
                .unwrap_or_default();
            // 片方だけ設定されている区画は空き扱い。
            let planting = match (saved.seed_id, saved.plant_time) {
                (Some(seed), Some(planted_at)) => Some(Planting { seed, planted_at }),
                _ => None,
            };
            FarmPlot { id, planting }
        })
        .collect();

    let bonus_plot = BonusPlot {
        last_harvest: field::<BonusSave>(obj, "cucumberPlot")
            .and_then(|b| b.last_harvest_time),
    };

    SaveSnapshot {
        level,
        coins,
        purchased_upgrades,
        equipped_cosmetics,
        mood,
        farm_plots,
        bonus_plot,
    }
}

// ── Gateway ───────────────────────────────────────────────────

/// Reads and writes the snapshot through a [`SaveStore`]. Failures are
/// logged and swallowed; callers never see a persistence error.
pub struct Gateway {
    store: Box<dyn SaveStore>,
}

impl Gateway {
    pub fn new(store: Box<dyn SaveStore>) -> Self {
        Self { store }
    }

    /// `None` on first run, or when the stored record had to be discarded.
    pub fn load(&mut self, config: &EngineConfig) -> Option<SaveSnapshot> {
        let raw = match self.store.load_raw(SAVE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read save");
                return None;
            }
        };
        match decode(&raw, config) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored save");
                self.clear();
                None
            }
        }
    }

    pub fn save(&mut self, snapshot: &SaveSnapshot) {
        let result = encode(snapshot).and_then(|json| self.store.save_raw(SAVE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not write save");
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.store.delete(SAVE_KEY) {
            tracing::warn!(error = %e, "could not delete save");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn sample() -> SaveSnapshot {
        let mut s = SaveSnapshot::defaults(&config());
        s.level = 4;
        s.coins = 321;
        s.purchased_upgrades = [UpgradeId::Compass, UpgradeId::CuteHat].into();
        s.equipped_cosmetics = [UpgradeId::CuteHat].into();
        s.mood = 55;
        s.farm_plots[2].planting = Some(Planting {
            seed: SeedId::Tomato,
            planted_at: 1_700_000_000_000,
        });
        s.bonus_plot.last_harvest = Some(1_699_999_000_000);
        s
    }

    #[test]
    fn encode_decode_roundtrip() {
        let original = sample();
        let json = encode(&original).unwrap();
        assert_eq!(decode(&json, &config()).unwrap(), original);
    }

    #[test]
    fn encoded_record_is_versioned() {
        let json = encode(&sample()).unwrap();
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["version"], SAVE_VERSION);
        assert_eq!(v["game"]["purchasedUpgrades"][0], "COMPASS");
        assert_eq!(v["game"]["farmPlots"][2]["seedId"], "tomato");
    }

    #[test]
    fn legacy_flat_record_is_accepted() {
        let json = r#"{
            "level": 3,
            "coins": 42,
            "purchasedUpgrades": ["FASTER_DIG", "STYLISH_COLLAR"],
            "equippedClothes": ["STYLISH_COLLAR"],
            "anastasiaMood": 80,
            "farmPlots": [
                {"id": 0, "seedId": "carrot", "plantTime": 1000},
                {"id": 1, "seedId": null, "plantTime": null}
            ],
            "cucumberPlot": {"id": 0, "lastHarvestTime": null}
        }"#;
        let s = decode(json, &config()).unwrap();
        assert_eq!(s.level, 3);
        assert_eq!(s.coins, 42);
        assert!(s.purchased_upgrades.contains(&UpgradeId::FasterDig));
        assert_eq!(s.mood, 80);
        assert_eq!(s.farm_plots.len(), 4);
        assert_eq!(
            s.farm_plots[0].planting,
            Some(Planting {
                seed: SeedId::Carrot,
                planted_at: 1000
            })
        );
        assert_eq!(s.farm_plots[3].planting, None);
        assert_eq!(s.bonus_plot.last_harvest, None);
    }

    #[test]
    fn malformed_fields_default_individually() {
        let json = r#"{"version": 1, "game": {
            "level": "seven",
            "coins": -5,
            "purchasedUpgrades": ["COMPASS", "JETPACK", 12],
            "anastasiaMood": 999,
            "farmPlots": [{"id": 0, "seedId": "carrot"}, "garbage"],
            "cucumberPlot": 17
        }}"#;
        let s = decode(json, &config()).unwrap();
        assert_eq!(s.level, 1);
        assert_eq!(s.coins, 0);
        let owned: Vec<_> = s.purchased_upgrades.into_iter().collect();
        assert_eq!(owned, vec![UpgradeId::Compass]);
        assert_eq!(s.mood, 100);
        assert!(s.farm_plots.iter().all(|p| p.planting.is_none()));
        assert_eq!(s.bonus_plot, BonusPlot::default());
    }

    #[test]
    fn level_zero_becomes_one() {
        let s = decode(r#"{"level": 0}"#, &config()).unwrap();
        assert_eq!(s.level, 1);
    }

    #[test]
    fn too_old_version_is_discarded() {
        assert!(matches!(
            decode(r#"{"version": 0, "game": {}}"#, &config()),
            Err(Discarded::TooOld { saved: 0, .. })
        ));
    }

    #[test]
    fn gateway_roundtrip_and_clear() {
        let handle = MemoryStore::new();
        let mut gateway = Gateway::new(Box::new(handle.clone()));
        assert_eq!(gateway.load(&config()), None);

        gateway.save(&sample());
        assert!(handle.contains(SAVE_KEY));
        assert_eq!(gateway.load(&config()), Some(sample()));

        gateway.clear();
        assert!(!handle.contains(SAVE_KEY));
        assert_eq!(gateway.load(&config()), None);
    }

    #[test]
    fn corrupt_record_is_deleted_on_load() {
        let handle = MemoryStore::new();
        handle.insert(SAVE_KEY, "{not json");
        let mut gateway = Gateway::new(Box::new(handle.clone()));
        assert_eq!(gateway.load(&config()), None);
        assert!(!handle.contains(SAVE_KEY));
    }
}
