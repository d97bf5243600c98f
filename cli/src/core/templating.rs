//! # Eisenhardt Template System
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Installs the static project template into a project's `.eisenhardt/`
//! directory and fills in its placeholders (most importantly `{{version}}`,
//! the PHP runtime version the stack's images are tagged with).
//!
//! ## Architecture
//!
//! 1. Copy the template tree to the target with `common::fs::copy`.
//! 2. Walk every regular file in the copy and replace each `{{<key>}}` token
//!    (or `{{ <key> }}`) whose key is one of the caller's variables.
//!
//! Substitution is a literal token replace. Anything else that looks like
//! template syntax (`{{.State.Status}}` in a compose healthcheck, `${#ARGS[@]}`
//! in a shell script, unknown `{{keys}}`) is written back byte for byte.
//!
//! Files that are not valid UTF-8 are left as copied. There is no rollback: a
//! failure leaves the partially installed tree behind.
//!
use crate::common::fs::copy;
use crate::core::error::Result;
use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Copies `source_dir` to `target_dir` and substitutes `vars` in every copied file.
pub fn install_template_tree(
    source_dir: &Path,
    target_dir: &Path,
    vars: &HashMap<String, String>,
) -> Result<()> {
    info!(
        "Installing template from '{}' to '{}'",
        source_dir.display(),
        target_dir.display()
    );
    copy::copy_directory_recursive(source_dir, target_dir)?;
    render_tree_in_place(target_dir, vars)?;
    info!("Template installed.");
    Ok(())
}

/// Substitutes `vars` in every file below `dir`, in place.
pub fn render_tree_in_place(dir: &Path, vars: &HashMap<String, String>) -> Result<()> {
    for entry in WalkDir::new(dir) {
        let entry = entry
            .with_context(|| format!("Failed to walk template tree '{}'", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        render_path(entry.path(), entry.path(), vars)?;
    }
    Ok(())
}

/// Substitutes `vars` in a single file from `source`, writing `target`.
pub fn render_file(source: &Path, target: &Path, vars: &HashMap<String, String>) -> Result<()> {
    render_path(source, target, vars)
}

/// Replaces the `{{key}}` and `{{ key }}` tokens of `vars` in `content`.
pub fn substitute_placeholders(content: &str, vars: &HashMap<String, String>) -> String {
    let mut rendered = content.to_string();
    for (key, value) in vars {
        for token in [format!("{{{{{}}}}}", key), format!("{{{{ {} }}}}", key)] {
            if rendered.contains(&token) {
                rendered = rendered.replace(&token, value);
            }
        }
    }
    rendered
}

fn render_path(source: &Path, target: &Path, vars: &HashMap<String, String>) -> Result<()> {
    let raw = fs::read(source)
        .with_context(|| format!("Failed to read template file '{}'", source.display()))?;
    let content = match String::from_utf8(raw) {
        Ok(text) => text,
        Err(e) => {
            debug!("Leaving binary file untouched: {}", source.display());
            if source != target {
                fs::write(target, e.into_bytes())
                    .with_context(|| format!("Failed to write '{}'", target.display()))?;
            }
            return Ok(());
        }
    };
    let rendered = substitute_placeholders(&content, vars);
    if source == target && rendered == content {
        return Ok(());
    }
    fs::write(target, rendered)
        .with_context(|| format!("Failed to write rendered file '{}'", target.display()))?;
    debug!("Rendered '{}' to '{}'", source.display(), target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn version_vars(version: &str) -> HashMap<String, String> {
        HashMap::from([("version".to_string(), version.to_string())])
    }

    #[test]
    fn test_install_substitutes_version_everywhere() -> Result<()> {
        let source = tempdir().unwrap();
        let target_root = tempdir().unwrap();
        let target = target_root.path().join(".eisenhardt");

        create_file(
            &source.path().join("base.yml"),
            "image: maxbucknell/php:{{version}}-fpm\n",
        );
        create_file(
            &source.path().join("servers/appserver/php.ini"),
            "; php {{version}}\nmemory_limit = 2G\n",
        );
        create_file(&source.path().join("contrib/.keep"), "");

        install_template_tree(source.path(), &target, &version_vars("7.2"))?;

        assert_eq!(
            fs::read_to_string(target.join("base.yml"))?,
            "image: maxbucknell/php:7.2-fpm\n"
        );
        assert!(fs::read_to_string(target.join("servers/appserver/php.ini"))?.starts_with("; php 7.2"));
        assert!(target.join("contrib/.keep").exists());
        Ok(())
    }

    #[test]
    fn test_binary_files_are_copied_verbatim() -> Result<()> {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        let bytes = [0xffu8, 0xfe, 0x00, b'{', b'{'];
        fs::write(source.path().join("favicon.ico"), bytes)?;

        install_template_tree(source.path(), &target.path().join("t"), &version_vars("7.1"))?;

        assert_eq!(fs::read(target.path().join("t/favicon.ico"))?, bytes);
        Ok(())
    }

    #[test]
    fn test_other_template_syntax_survives() -> Result<()> {
        let source = tempdir().unwrap();
        let target = tempdir().unwrap();
        let script = "#!/bin/sh\necho ${#ARGS[@]} {% raw %}\n";
        let healthcheck = "test: docker inspect -f '{{.State.Status}}' db\nimage: php:{{ version }} {{unknown}}\n";
        create_file(&source.path().join("entry.sh"), script);
        create_file(&source.path().join("healthcheck.yml"), healthcheck);

        install_template_tree(source.path(), &target.path().join("t"), &version_vars("7.2"))?;

        assert_eq!(fs::read_to_string(target.path().join("t/entry.sh"))?, script);
        assert_eq!(
            fs::read_to_string(target.path().join("t/healthcheck.yml"))?,
            "test: docker inspect -f '{{.State.Status}}' db\nimage: php:7.2 {{unknown}}\n"
        );
        Ok(())
    }

    #[test]
    fn test_substitute_placeholders() {
        let vars = HashMap::from([
            ("version".to_string(), "7.1".to_string()),
            ("module_directory".to_string(), "/src/m".to_string()),
        ]);
        assert_eq!(
            substitute_placeholders("{{version}}-fpm {{version}} {{module_directory}}", &vars),
            "7.1-fpm 7.1 /src/m"
        );
        assert_eq!(substitute_placeholders("{{ version}}", &vars), "{{ version}}");
    }

    #[test]
    fn test_render_single_file() -> Result<()> {
        let dir = tempdir().unwrap();
        let source = dir.path().join("standup.yml");
        let target = dir.path().join("out.yml");
        create_file(&source, "- {{module_directory}}:/mnt/module\n");

        let vars = HashMap::from([("module_directory".to_string(), "/src/module".to_string())]);
        render_file(&source, &target, &vars)?;

        assert_eq!(fs::read_to_string(target)?, "- /src/module:/mnt/module\n");
        Ok(())
    }
}
