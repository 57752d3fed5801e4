use super::*;
use std::collections::HashMap;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_empty_file_uses_defaults() {
    let settings = EngineSettings::from_toml_str("").unwrap();
    assert_eq!(settings, EngineSettings::default());

    let config = settings.engine_config().unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_parse_full_file() {
    let text = r#"
        name = "Tester"
        author = "someone"
        strategy = "alphabeta"
        evaluator = "material"
        time_limit_secs = 0.25
        exploration_weight = 2.0
        max_depth = 4
        rollout_depth_cap = 30
        rollout_score_scale = 5.0
        rollout_policy = "tactical"
        expansion_policy = "greedy"
        seed = 7
        log_level = "debug"
    "#;
    let settings = EngineSettings::from_toml_str(text).unwrap();

    assert_eq!(settings.name, "Tester");
    assert_eq!(settings.strategy, StrategyKind::Alphabeta);
    assert_eq!(settings.evaluator, EvaluatorKind::Material);

    let config = settings.engine_config().unwrap();
    assert_eq!(config.time_limit_per_move, Duration::from_millis(250));
    assert_eq!(config.exploration_weight, 2.0);
    assert_eq!(config.max_depth, 4);
    assert_eq!(config.rollout_depth_cap, Some(30));
    assert_eq!(config.rollout_score_scale, 5.0);
    assert_eq!(config.rollout, RolloutPolicy::Tactical);
    assert_eq!(config.expansion, ExpansionPolicy::Greedy);
    assert_eq!(config.seed, 7);
}

#[test]
fn test_unknown_strategy_is_parse_error() {
    let result = EngineSettings::from_toml_str(r#"strategy = "random""#);
    assert!(matches!(result, Err(SettingsError::Parse(_))));
}

#[test]
fn test_env_overrides_file() {
    let mut settings = EngineSettings::from_toml_str("max_depth = 2").unwrap();
    settings
        .apply_env_overrides(env(&[
            ("ENGINE_STRATEGY", "alphabeta"),
            ("ENGINE_MOVE_TIME", "1.5"),
            ("ENGINE_DEPTH", "6"),
            ("ENGINE_EXPLORATION_WEIGHT", "0.7"),
            ("ENGINE_LOG", "trace"),
        ]))
        .unwrap();

    assert_eq!(settings.strategy, StrategyKind::Alphabeta);
    assert_eq!(settings.time_limit_secs, 1.5);
    assert_eq!(settings.max_depth, 6);
    assert_eq!(settings.exploration_weight, 0.7);
    assert_eq!(settings.log_level, "trace");
}

#[test]
fn test_bad_env_value_fails() {
    let mut settings = EngineSettings::default();
    let err = settings
        .apply_env_overrides(env(&[("ENGINE_DEPTH", "three")]))
        .unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidEnv { var: "ENGINE_DEPTH", .. }
    ));
}

#[test]
fn test_invalid_values_rejected() {
    let zero_time = EngineSettings {
        time_limit_secs: 0.0,
        ..EngineSettings::default()
    };
    assert!(matches!(
        zero_time.engine_config(),
        Err(SettingsError::Invalid(SearchError::InvalidConfiguration(_)))
    ));

    let zero_depth = EngineSettings {
        max_depth: 0,
        ..EngineSettings::default()
    };
    assert!(zero_depth.engine_config().is_err());

    let negative_weight = EngineSettings {
        exploration_weight: -1.0,
        ..EngineSettings::default()
    };
    assert!(negative_weight.engine_config().is_err());
}

#[test]
fn test_learned_evaluator_needs_weights() {
    let settings = EngineSettings {
        evaluator: EvaluatorKind::Learned,
        ..EngineSettings::default()
    };
    assert!(matches!(
        settings.build_evaluator(),
        Err(SettingsError::Invalid(_))
    ));

    let missing_file = EngineSettings {
        weights_path: Some(PathBuf::from("/nonexistent/weights.json")),
        ..settings
    };
    assert!(matches!(
        missing_file.build_evaluator(),
        Err(SettingsError::Evaluator(EvalError::Io(_)))
    ));
}

#[test]
fn test_build_strategy() {
    let settings = EngineSettings {
        strategy: StrategyKind::Alphabeta,
        evaluator: EvaluatorKind::Material,
        ..EngineSettings::default()
    };
    assert_eq!(settings.build_strategy().unwrap().kind(), StrategyKind::Alphabeta);
}

#[test]
fn test_unrepresentable_time_limit_rejected() {
    let huge = EngineSettings::from_toml_str("time_limit_secs = 1e30").unwrap();
    assert!(matches!(
        huge.engine_config(),
        Err(SettingsError::Invalid(SearchError::InvalidConfiguration(_)))
    ));

    let mut settings = EngineSettings::default();
    settings
        .apply_env_overrides(env(&[("ENGINE_MOVE_TIME", "inf")]))
        .unwrap();
    assert!(settings.engine_config().is_err());

    settings.time_limit_secs = f64::NAN;
    assert!(settings.engine_config().is_err());
}
