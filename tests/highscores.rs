use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use grid_snake::score::{HighscoreEntry, HighscoreStore};

fn unique_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after epoch")
        .as_nanos();

    std::env::temp_dir()
        .join("snake-highscore-it")
        .join(format!("{label}-{nanos}.json"))
}

#[test]
fn list_stays_sorted_and_bounded_across_sessions() {
    let path = unique_path("sessions");
    let scores = [4, 12, 12, 1, 30, 7, 12, 2, 19];

    for (round, score) in scores.iter().enumerate() {
        let mut store = HighscoreStore::load(&path);
        if store.is_qualifying(*score) {
            store.insert(HighscoreEntry::new(format!("round{round}"), *score));
            store.save().expect("save should succeed");
        }

        let reloaded = HighscoreStore::load(&path);
        assert!(reloaded.entries().len() <= 5);
        assert!(
            reloaded
                .entries()
                .windows(2)
                .all(|pair| pair[0].score >= pair[1].score)
        );
    }

    let final_list = HighscoreStore::load(&path);
    let summary: Vec<(&str, u32)> = final_list
        .entries()
        .iter()
        .map(|e| (e.player_name.as_str(), e.score))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("round4", 30),
            ("round8", 19),
            ("round1", 12),
            ("round2", 12),
            ("round6", 12),
        ]
    );

    let _ = fs::remove_file(&path);
}

#[test]
fn zero_score_never_prompts_even_with_empty_list() {
    let store = HighscoreStore::load(unique_path("empty"));
    assert!(!store.is_qualifying(0));
    assert!(store.is_qualifying(1));
}
