/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub rules: RulesConfig,
    /// Fixed RNG seed for reproducible runs; None draws one from the OS.
    pub seed: Option<u64>,
}

/// Engine tuning knobs. The defaults reproduce the reference ruleset.
#[derive(Clone, Debug)]
pub struct RulesConfig {
    pub max_energy: u32,
    pub base_mining_strength: u32,
    pub boosted_mining_strength: u32,
    /// Moles move every this-many turns.
    pub mole_move_period: u64,
    /// Strength applied to every cell of an explosion's 3×3 block;
    /// must clear any tile type in one hit.
    pub explosion_strength: u32,
    /// Mole count per level = level number + this.
    pub mole_base_count: usize,
    /// Max fullness per level = base + level number * per_level.
    pub mole_fullness_base: u32,
    pub mole_fullness_per_level: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            max_energy: default_max_energy(),
            base_mining_strength: default_base_strength(),
            boosted_mining_strength: default_boosted_strength(),
            mole_move_period: default_mole_period(),
            explosion_strength: default_explosion_strength(),
            mole_base_count: default_mole_base_count(),
            mole_fullness_base: default_fullness_base(),
            mole_fullness_per_level: default_fullness_per_level(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    rules: TomlRules,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_max_energy")]
    max_energy: u32,
    #[serde(default = "default_base_strength")]
    base_mining_strength: u32,
    #[serde(default = "default_boosted_strength")]
    boosted_mining_strength: u32,
    #[serde(default = "default_mole_period")]
    mole_move_period: u64,
    #[serde(default = "default_explosion_strength")]
    explosion_strength: u32,
    #[serde(default = "default_mole_base_count")]
    mole_base_count: usize,
    #[serde(default = "default_fullness_base")]
    mole_fullness_base: u32,
    #[serde(default = "default_fullness_per_level")]
    mole_fullness_per_level: u32,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
}

// ── Defaults ──

fn default_max_energy() -> u32 { 300 }
fn default_base_strength() -> u32 { 5 }
fn default_boosted_strength() -> u32 { 25 }
fn default_mole_period() -> u64 { 4 }
fn default_explosion_strength() -> u32 { 100 }
fn default_mole_base_count() -> usize { 4 }
fn default_fullness_base() -> u32 { 100 }
fn default_fullness_per_level() -> u32 { 100 }

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            max_energy: default_max_energy(),
            base_mining_strength: default_base_strength(),
            boosted_mining_strength: default_boosted_strength(),
            mole_move_period: default_mole_period(),
            explosion_strength: default_explosion_strength(),
            mole_base_count: default_mole_base_count(),
            mole_fullness_base: default_fullness_base(),
            mole_fullness_per_level: default_fullness_per_level(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig {
            rules: RulesConfig {
                max_energy: toml_cfg.rules.max_energy,
                base_mining_strength: toml_cfg.rules.base_mining_strength,
                boosted_mining_strength: toml_cfg.rules.boosted_mining_strength,
                mole_move_period: toml_cfg.rules.mole_move_period,
                explosion_strength: toml_cfg.rules.explosion_strength,
                mole_base_count: toml_cfg.rules.mole_base_count,
                mole_fullness_base: toml_cfg.rules.mole_fullness_base,
                mole_fullness_per_level: toml_cfg.rules.mole_fullness_per_level,
            },
            seed: toml_cfg.general.seed,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
