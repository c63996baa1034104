use std::path::Path;
use walkdir::WalkDir;

// Domains depend on the gateway ports in `shared`, never on concrete
// infrastructure. Unit tests are the one sanctioned exception: they may
// exercise code against the in-memory state store.
const TEST_DOUBLE_EXCEPTIONS: &[(&str, &str)] = &[
    ("domains/tabs/store.rs", "infrastructure::storage::MemoryStateStore"),
    (
        "domains/tabs/reconciler.rs",
        "infrastructure::storage::MemoryStateStore",
    ),
    ("domains/tabs/view.rs", "infrastructure::storage::MemoryStateStore"),
    (
        "domains/settings/types.rs",
        "infrastructure::storage::MemoryStateStore",
    ),
];

fn is_excepted(path: &Path, line: &str) -> bool {
    TEST_DOUBLE_EXCEPTIONS.iter().any(|(suffix, fragment)| {
        path.to_string_lossy().replace('\\', "/").ends_with(suffix) && line.contains(fragment)
    })
}

#[test]
fn domains_do_not_import_infrastructure() {
    let mut violations = Vec::new();

    for entry in WalkDir::new("src/domains")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
    {
        let path = entry.path();
        let source = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));

        for (number, line) in source.lines().enumerate() {
            if line.contains("crate::infrastructure") && !is_excepted(path, line) {
                violations.push(format!(
                    "{}:{}: {}",
                    path.display(),
                    number + 1,
                    line.trim()
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "domains must depend on shared ports, not infrastructure:\n{}",
        violations.join("\n")
    );
}

#[test]
fn shared_ports_stay_free_of_concrete_backends() {
    let mut violations = Vec::new();

    for entry in WalkDir::new("src/shared")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
    {
        let path = entry.path();
        let source = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));

        for (number, line) in source.lines().enumerate() {
            // Doc comments may cross-reference implementations.
            if line.trim_start().starts_with("//") {
                continue;
            }
            if line.contains("rusqlite")
                || line.contains("git2")
                || line.contains("crate::infrastructure")
                || line.contains("crate::domains")
            {
                violations.push(format!(
                    "{}:{}: {}",
                    path.display(),
                    number + 1,
                    line.trim()
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "shared ports must not reference concrete backends or domains:\n{}",
        violations.join("\n")
    );
}
