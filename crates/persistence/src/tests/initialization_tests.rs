// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::backend::sqlite::verify_foreign_key_enforcement;
use crate::tests::create_activity;
use crate::{ActivityStore, Persistence};

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    create_activity(&mut first, "SITE-001");

    assert_eq!(first.list_activities().unwrap().len(), 1);
    assert!(second.list_activities().unwrap().is_empty());
}

#[test]
fn test_foreign_keys_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(verify_foreign_key_enforcement(&mut persistence.conn).is_ok());
}

#[test]
fn test_file_database_persists_across_connections() {
    let dir: std::path::PathBuf = std::env::temp_dir().join(format!(
        "decom-persistence-test-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path: std::path::PathBuf = dir.join("activities.db");
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        create_activity(&mut persistence, "SITE-FILE");
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let activities = reopened.list_activities().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].site_code, "SITE-FILE");

    drop(reopened);
    let _ = std::fs::remove_dir_all(&dir);
}
