use std::fs;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Dockerfile instructions with line continuations joined and comments dropped.
fn instructions() -> Vec<(usize, String)> {
    let content = fs::read_to_string(repo_root().join("Dockerfile")).expect("read Dockerfile");
    let mut out = Vec::new();
    let mut current = String::new();
    let mut start_line = 0;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if current.is_empty() && (line.is_empty() || line.starts_with('#')) {
            continue;
        }
        if current.is_empty() {
            start_line = idx + 1;
        }
        match line.strip_suffix('\\') {
            Some(head) => {
                current.push_str(head.trim());
                current.push(' ');
            }
            None => {
                current.push_str(line);
                out.push((start_line, std::mem::take(&mut current)));
            }
        }
    }
    out
}

fn position(predicate: impl Fn(&str) -> bool) -> Option<usize> {
    instructions().iter().position(|(_, i)| predicate(i))
}

fn copy_sources(instruction: &str) -> Option<Vec<String>> {
    let rest = instruction.strip_prefix("COPY ")?;
    if rest.contains("--from=") {
        return None;
    }
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    Some(
        tokens[..tokens.len() - 1]
            .iter()
            .map(|s| s.trim_matches('"').to_string())
            .collect(),
    )
}

#[test]
fn base_images_are_version_pinned() {
    let mut violations = Vec::new();
    for (line, instruction) in instructions() {
        let Some(rest) = instruction.strip_prefix("FROM ") else {
            continue;
        };
        let image = rest.split_whitespace().next().expect("FROM image");
        let tag = image.rsplit_once(':').map(|(_, tag)| tag);
        let pinned = image.contains("@sha256:")
            || tag.is_some_and(|t| t != "latest" && t.chars().any(|c| c.is_ascii_digit()));
        if !pinned {
            violations.push(format!("Dockerfile:{} `{}` is not version pinned", line, image));
        }
    }

    assert!(violations.is_empty(), "{}", violations.join("\n"));
}

#[test]
fn dependency_layer_precedes_source_copy() {
    let manifest_copy = position(|i| i.starts_with("COPY ") && i.contains("Cargo.toml"))
        .expect("manifest COPY");
    let dependency_build = position(|i| i.starts_with("RUN ") && i.contains("cargo build"))
        .expect("dependency build step");
    let source_copy =
        position(|i| i.starts_with("COPY ") && i.contains("src ")).expect("source COPY");

    assert!(manifest_copy < dependency_build);
    assert!(dependency_build < source_copy);
}

#[test]
fn cargo_builds_are_locked() {
    let builds: Vec<(usize, String)> = instructions()
        .into_iter()
        .filter(|(_, i)| i.starts_with("RUN ") && i.contains("cargo build"))
        .collect();
    assert!(builds.len() >= 2, "expected dependency and application builds");

    let unlocked: Vec<String> = builds
        .iter()
        .filter(|(_, i)| {
            i.split("&&")
                .filter(|cmd| cmd.contains("cargo build"))
                .any(|cmd| !cmd.split_whitespace().any(|arg| arg == "--locked"))
        })
        .map(|(line, i)| format!("Dockerfile:{} `{}`", line, i))
        .collect();

    assert!(unlocked.is_empty(), "cargo build without --locked:\n{}", unlocked.join("\n"));
}

#[test]
fn lockfile_is_copied_with_the_manifest() {
    let (_, manifest_copy) = instructions()
        .into_iter()
        .find(|(_, i)| i.starts_with("COPY ") && i.contains("Cargo.toml"))
        .expect("manifest COPY");
    let sources = copy_sources(&manifest_copy).expect("COPY sources");

    assert!(
        sources.iter().any(|s| s == "Cargo.lock"),
        "manifest COPY must name Cargo.lock exactly: {:?}",
        sources
    );
    assert!(repo_root().join("Cargo.lock").is_file(), "Cargo.lock must be committed");
}

#[test]
fn dependency_resolution_fails_before_source_copy() {
    // A crate missing from the registry or the lockfile aborts this RUN, and
    // no later layer (source COPY included) is built.
    let (dependency_build, instruction) = instructions()
        .into_iter()
        .enumerate()
        .find(|(_, (_, i))| i.starts_with("RUN ") && i.contains("cargo build"))
        .map(|(idx, (_, i))| (idx, i))
        .expect("dependency build step");
    let source_copy =
        position(|i| i.starts_with("COPY ") && i.contains("src ")).expect("source COPY");

    assert!(dependency_build < source_copy);
    assert!(instruction.contains("--locked"));
    assert!(
        !instruction.contains("|| true") && !instruction.contains("; "),
        "dependency build failures must not be masked: {}",
        instruction
    );
}

#[test]
fn working_directory_is_set_before_file_operations() {
    let workdir = position(|i| i.starts_with("WORKDIR ")).expect("WORKDIR");
    let first_copy = position(|i| i.starts_with("COPY ")).expect("COPY");
    assert!(workdir < first_copy);
}

#[test]
fn copy_sources_exist_in_build_context() {
    let root = repo_root();
    let mut missing = Vec::new();

    for (line, instruction) in instructions() {
        let Some(sources) = copy_sources(&instruction) else {
            continue;
        };
        for src in sources {
            if src.contains('*') {
                missing.push(format!("Dockerfile:{} -> {} is a glob", line, src));
                continue;
            }
            if !root.join(Path::new(&src)).exists() {
                missing.push(format!("Dockerfile:{} -> {}", line, src));
            }
        }
    }

    assert!(missing.is_empty(), "COPY sources must exist:\n{}", missing.join("\n"));
}

#[test]
fn port_5000_is_exposed() {
    let exposed: Vec<String> = instructions()
        .into_iter()
        .filter_map(|(_, i)| i.strip_prefix("EXPOSE ").map(str::to_string))
        .flat_map(|ports| ports.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect();

    assert!(
        exposed.iter().any(|p| p == "5000" || p == "5000/tcp"),
        "exposed ports: {:?}",
        exposed
    );
}

#[test]
fn launch_command_is_exec_form_without_arguments() {
    let (_, cmd) = instructions()
        .into_iter()
        .filter(|(_, i)| i.starts_with("CMD ") || i.starts_with("ENTRYPOINT "))
        .last()
        .expect("launch command");
    let json = cmd.split_once(' ').map(|(_, rest)| rest).expect("command body");
    let argv: Vec<String> = serde_json::from_str(json).expect("exec-form JSON array");

    assert_eq!(argv, vec!["quantum-tutor".to_string()]);
    let binary = fs::read_to_string(repo_root().join("Cargo.toml")).expect("read Cargo.toml");
    assert!(binary.contains("name = \"quantum-tutor\""));
}
