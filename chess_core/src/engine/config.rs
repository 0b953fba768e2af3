use serde::{Deserialize, Serialize};

/// Tunable evaluation and search constants. Every term is deterministic;
/// changing a value reshapes the playing style but never introduces
/// hidden state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation terms.
    pub checkmate_bonus: i32,
    pub check_bonus: i32,
    pub castle_bonus: i32,
    pub mobility_multiplier: i32,
    pub attack_multiplier: i32,
    pub two_bishops_bonus: i32,
    /// Multiplier applied per ply of remaining depth to the checkmate
    /// bonus, so nearer mates outscore deeper ones.
    pub depth_bonus: i32,
    pub isolated_pawn_penalty: i32,
    pub doubled_pawn_penalty: i32,
    pub open_file_rook_bonus: i32,
    /// Weight of the king-tropism term; zero keeps it out of the sum.
    pub king_tropism_weight: i32,

    // Search limits.
    /// Cap on quiescence extensions granted per root candidate.
    pub max_quiescence: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            checkmate_bonus: 100_000,
            check_bonus: 20,
            castle_bonus: 40,
            mobility_multiplier: 2,
            attack_multiplier: 2,
            two_bishops_bonus: 50,
            depth_bonus: 100,
            isolated_pawn_penalty: -25,
            doubled_pawn_penalty: -25,
            open_file_rook_bonus: 25,
            king_tropism_weight: 0,
            max_quiescence: 5000,
        }
    }
}

impl EngineConfig {
    /// Loads a partial configuration: absent fields keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config.checkmate_bonus, 100_000);
        assert_eq!(config.castle_bonus, 40);
        assert_eq!(config.max_quiescence, 5000);
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "check_bonus": 45,
            "max_quiescence": 100
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.check_bonus, 45);
        assert_eq!(config.max_quiescence, 100);
        // Untouched fields keep their defaults.
        assert_eq!(config.mobility_multiplier, 2);
        assert_eq!(config.isolated_pawn_penalty, -25);
    }

    #[test]
    fn test_load_config_invalid_json() {
        assert!(EngineConfig::load_from_json("{ invalid json }").is_err());
    }
}
