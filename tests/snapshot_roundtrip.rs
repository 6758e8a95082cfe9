use std::fs;

use blackjack_rl::{Agent, Error, State};
use tempfile::TempDir;

fn trained_agent(seed: u64) -> Agent {
    let mut agent = Agent::from_seed(seed);
    agent.mc_run(300).unwrap();
    agent.td_run(300).unwrap();
    agent.q_run(300).unwrap();
    agent
}

fn assert_agents_equal(a: &Agent, b: &Agent) {
    for state in State::all() {
        assert_eq!(
            a.tables().mc_value(&state).unwrap(),
            b.tables().mc_value(&state).unwrap()
        );
        assert_eq!(
            a.tables().mc_return_sum(&state).unwrap(),
            b.tables().mc_return_sum(&state).unwrap()
        );
        assert_eq!(
            a.tables().mc_count(&state).unwrap(),
            b.tables().mc_count(&state).unwrap()
        );
        assert_eq!(
            a.tables().td_value(&state).unwrap(),
            b.tables().td_value(&state).unwrap()
        );
        assert_eq!(
            a.tables().td_count(&state).unwrap(),
            b.tables().td_count(&state).unwrap()
        );
        assert_eq!(
            a.tables().q_pair(&state).unwrap(),
            b.tables().q_pair(&state).unwrap()
        );
        assert_eq!(
            a.tables().q_count(&state).unwrap(),
            b.tables().q_count(&state).unwrap()
        );
    }
}

#[test]
fn save_then_load_restores_every_table_exactly() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("trained_snapshot");

    let agent = trained_agent(29);
    agent.save(&path).unwrap();

    let mut restored = Agent::new();
    restored.load(&path).unwrap();
    assert_agents_equal(&agent, &restored);
}

#[test]
fn snapshot_file_has_the_documented_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("fresh_snapshot");

    Agent::new().save(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    let blocks: Vec<&str> = text.trim_end_matches('\n').split("\n\n").collect();
    assert_eq!(blocks.len(), 7);
    for block in &blocks {
        assert_eq!(block.lines().count(), State::all().count());
        for line in block.lines() {
            let (key, value) = line.split_once(' ').expect("one space per line");
            assert!(key.starts_with('(') && key.ends_with(')'));
            assert!(!value.contains(' '));
        }
    }
}

#[test]
fn loading_a_missing_file_fails_with_io_error() {
    let mut agent = Agent::new();
    let result = agent.load("/nonexistent/snapshot");
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn failed_loads_leave_the_tables_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("corrupt_snapshot");
    fs::write(&path, "not a snapshot at all").unwrap();

    let mut agent = trained_agent(31);
    let probe = State::Win;
    let before = agent.tables().mc_value(&probe).unwrap();

    assert!(agent.load(&path).is_err());
    assert_eq!(agent.tables().mc_value(&probe).unwrap(), before);
}

#[test]
fn round_trip_survives_a_second_generation() {
    // Values written once and reloaded must re-save to the identical file.
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first_path = temp_dir.path().join("first");
    let second_path = temp_dir.path().join("second");

    let agent = trained_agent(37);
    agent.save(&first_path).unwrap();

    let mut reloaded = Agent::new();
    reloaded.load(&first_path).unwrap();
    reloaded.save(&second_path).unwrap();

    assert_eq!(
        fs::read_to_string(&first_path).unwrap(),
        fs::read_to_string(&second_path).unwrap()
    );
}
