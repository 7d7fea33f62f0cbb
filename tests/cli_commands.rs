use clap::Parser;
use tabular_rl::{
    cli::commands::{
        compare::{self, CompareArgs},
        evaluate::{self, EvaluateArgs},
        train::{self, TrainArgs},
    },
    envs::ChainState,
    q_learning::{Algorithm, SavedAgent},
};
use tempfile::tempdir;

#[test]
fn train_writes_agent_summary_and_exports() {
    let tmp = tempdir().unwrap();
    let agent_path = tmp.path().join("agent.msgpack");
    let summary_stem = tmp.path().join("run_overview");
    let curve_path = tmp.path().join("curve.csv");
    let values_path = tmp.path().join("values.csv");

    let args = TrainArgs::parse_from([
        "tabular-rl-train",
        "q-learning-eps",
        "--episodes",
        "50",
        "--seed",
        "7",
        "--no-progress",
        "-O",
        agent_path.to_str().unwrap(),
        "--summary",
        summary_stem.to_str().unwrap(),
        "--curve",
        curve_path.to_str().unwrap(),
        "--values",
        values_path.to_str().unwrap(),
    ]);

    train::execute(args).expect("training should succeed");

    let summary_path = summary_stem.with_extension("json");
    let contents = std::fs::read_to_string(&summary_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["episodes"], 50);
    assert_eq!(parsed["rewards"].as_array().unwrap().len(), 50);

    let curve = std::fs::read_to_string(&curve_path).unwrap();
    assert_eq!(curve.lines().count(), 51);

    let values = std::fs::read_to_string(&values_path).unwrap();
    assert!(values.lines().count() >= 2);

    let saved = SavedAgent::<ChainState>::load_from_file(&agent_path).unwrap();
    assert_eq!(saved.algorithm, Algorithm::QLearningEpsScheduling);
    assert_eq!(saved.metadata.episodes, 50);
    assert_eq!(saved.episode(), 50);

    let eval = EvaluateArgs::parse_from([
        "tabular-rl-evaluate",
        agent_path.to_str().unwrap(),
        "--episodes",
        "5",
    ]);
    evaluate::execute(eval).expect("evaluation should succeed");
}

#[test]
fn summary_directory_argument_creates_default_file() {
    let tmp = tempdir().unwrap();
    let summary_dir = tmp.path().join("summaries");
    let summary_arg = format!("{}{}", summary_dir.display(), std::path::MAIN_SEPARATOR);

    let args = TrainArgs::parse_from([
        "tabular-rl-train",
        "sarsa",
        "--episodes",
        "3",
        "--no-progress",
        "--summary",
        &summary_arg,
    ]);

    train::execute(args).expect("training with directory summary should succeed");

    let expected_path = summary_dir.join("training_summary.json");
    assert!(
        expected_path.exists(),
        "expected summary at {}",
        expected_path.display()
    );
    let contents = std::fs::read_to_string(&expected_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["episodes"], 3);
}

#[test]
fn invalid_hyperparameter_is_rejected() {
    let args = TrainArgs::parse_from([
        "tabular-rl-train",
        "q-learning",
        "--episodes",
        "3",
        "--no-progress",
        "--epsilon",
        "1.5",
    ]);
    assert!(train::execute(args).is_err());
}

#[test]
fn compare_writes_one_row_per_algorithm() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("comparison.json");

    let args = CompareArgs::parse_from([
        "tabular-rl-compare",
        "--episodes",
        "200",
        "--seed",
        "3",
        "--eval-episodes",
        "5",
        "--output",
        output.to_str().unwrap(),
    ]);
    compare::execute(args).expect("comparison should succeed");

    let contents = std::fs::read_to_string(&output).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row["episodes"], 200);
    }
}
