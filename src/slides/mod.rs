#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Persisted author environment.
pub mod env;
/// Makefile and LaTeX templates.
pub mod templates;

use std::{
    collections::BTreeMap,
    fmt::Write as _,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};

pub use env::SlidesEnv;

use crate::util::{file_timestamp, list_entries, set_file_timestamp};

/// Directory below the course root holding one directory per lesson.
pub const LESSON_DIR: &str = "lessons";
/// Generated slides file inside every lesson directory.
pub const SLIDES_FILENAME: &str = "slides.tex";
/// Generated Makefile in the course root.
pub const MAKEFILE: &str = "Makefile";
/// Files every lesson directory has to provide.
pub const REQUIRED_FILES: &[&str] = &["content.tex"];

/// Errors that stop a configure run.
#[derive(thiserror::Error, Debug)]
pub enum ConfigureError {
    /// A lesson directory lacks one of [`REQUIRED_FILES`].
    #[error("Configure incomplete: lesson directory `{lesson}` is missing {missing}")]
    Incomplete {
        /// name of the lesson directory
        lesson:  String,
        /// name of the missing file
        missing: String,
    },
    /// Anything else, mostly I/O
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

/// Discovers lessons below a course root and writes their build files.
#[derive(Debug)]
pub struct Configure {
    /// Course root, where the Makefile goes.
    base_path:  PathBuf,
    /// Time of the previous configure run; `None` rebuilds everything.
    last_build: Option<SystemTime>,
    /// Lesson directories by lesson number.
    lessons:    BTreeMap<u32, PathBuf>,
    /// Values for the title pages.
    env:        SlidesEnv,
}

impl Configure {
    /// Prepares a run in `base_path`.
    ///
    /// The previous run is dated by the Makefile, or by the configurator
    /// binary if that is newer. With `force`, or without a Makefile, every
    /// slides file is regenerated.
    pub fn new(base_path: impl Into<PathBuf>, force: bool) -> Result<Self> {
        let base_path = base_path.into();
        let env = SlidesEnv::load(&base_path)?;

        let last_build = if force {
            None
        } else {
            file_timestamp(&base_path.join(MAKEFILE)).ok().map(|makefile| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| file_timestamp(&exe).ok())
                    .map_or(makefile, |exe| makefile.max(exe))
            })
        };

        Ok(Self {
            base_path,
            last_build,
            lessons: BTreeMap::new(),
            env,
        })
    }

    /// Applies and persists new title page values. Slides are regenerated
    /// when anything changed; the environment file is written if it changed
    /// or does not exist yet.
    pub fn update_env(&mut self, overrides: SlidesEnv) -> Result<()> {
        let changed = self.env.merge(overrides);
        if changed {
            tracing::info!("title page values changed, regenerating all slides");
            self.last_build = None;
        }
        if changed || !SlidesEnv::path(&self.base_path).exists() {
            self.env.save(&self.base_path)?;
        }
        Ok(())
    }

    /// Title page values in use.
    pub fn env(&self) -> &SlidesEnv {
        &self.env
    }

    /// Lessons found by [`Configure::autodiscover_lessons`].
    pub fn lessons(&self) -> &BTreeMap<u32, PathBuf> {
        &self.lessons
    }

    /// Finds numbered lesson directories. Entries whose name is not a number
    /// are skipped with a warning.
    pub fn autodiscover_lessons(&mut self) -> Result<(), ConfigureError> {
        let lesson_dir = self.base_path.join(LESSON_DIR);
        if !lesson_dir.is_dir() {
            return Err(anyhow::anyhow!("Could not find lesson directory {}", lesson_dir.display()).into());
        }

        for path in list_entries(&lesson_dir)? {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let Ok(lesson_no) = name.trim().parse::<u32>() else {
                tracing::warn!("found garbage directory name: `{name}'");
                continue;
            };

            check_lesson_directory(&path, &name)?;
            if let Some(previous) = self.lessons.insert(lesson_no, path) {
                tracing::warn!(
                    "lesson {lesson_no} found twice, using `{name}' over `{}'",
                    previous.display()
                );
            }
        }

        Ok(())
    }

    /// Writes `slides.tex` for every lesson, then the Makefile, and dates all
    /// of them to the same second so `make` does not rebuild them needlessly.
    pub fn configure_lessons(&self) -> Result<()> {
        for (lesson_no, path) in &self.lessons {
            tracing::info!("configuring lesson {lesson_no}");
            self.create_slides_file(*lesson_no, path)?;
        }

        let timestamp = self.create_makefile()?;
        for path in self.lessons.values() {
            set_file_timestamp(&path.join(SLIDES_FILENAME), timestamp)?;
        }
        Ok(())
    }

    /// Writes the slides file of one lesson unless it is newer than the
    /// previous run. Returns whether it was written.
    pub fn create_slides_file(&self, lesson_no: u32, lesson_path: &Path) -> Result<bool> {
        let slides_path = lesson_path.join(SLIDES_FILENAME);
        if let Some(last_build) = self.last_build
            && let Ok(modified) = file_timestamp(&slides_path)
            && modified >= last_build
        {
            return Ok(false);
        }

        std::fs::write(&slides_path, templates::slides_file(lesson_no, &self.env))
            .with_context(|| format!("Could not write {}", slides_path.display()))?;
        Ok(true)
    }

    /// Renders the Makefile.
    pub fn makefile(&self) -> String {
        let mut out = String::from(templates::MAKEFILE_HEADER);
        for (lesson_no, path) in &self.lessons {
            let rel_path = path.strip_prefix(&self.base_path).unwrap_or(path);
            let _ = write!(
                out,
                "{}",
                templates::lesson_slides_target(*lesson_no, &rel_path.to_string_lossy())
            );
        }
        out.push_str(&templates::slides_target(self.lessons.keys().copied()));
        out.push_str(templates::MAKEFILE_FOOTER);
        out
    }

    /// Writes the Makefile and returns its modification time, truncated to
    /// whole seconds.
    pub fn create_makefile(&self) -> Result<SystemTime> {
        tracing::info!("writing Makefile");
        let makefile = self.base_path.join(MAKEFILE);
        std::fs::write(&makefile, self.makefile())
            .with_context(|| format!("Could not write {}", makefile.display()))?;

        let modified = file_timestamp(&makefile)?;
        let secs = modified
            .duration_since(UNIX_EPOCH)
            .context("Makefile is dated before the epoch")?
            .as_secs();
        let timestamp = UNIX_EPOCH + Duration::from_secs(secs);
        set_file_timestamp(&makefile, timestamp)?;
        Ok(timestamp)
    }
}

/// Ensures a lesson directory contains every required file.
fn check_lesson_directory(path: &Path, name: &str) -> Result<(), ConfigureError> {
    for filename in REQUIRED_FILES {
        if !path.join(filename).is_file() {
            tracing::error!("lesson directory `{name}' is missing {filename}");
            return Err(ConfigureError::Incomplete {
                lesson:  name.to_string(),
                missing: filename.to_string(),
            });
        }
    }
    Ok(())
}

/// Runs a complete configure pass in `base_path`.
pub fn configure(base_path: &Path, force: bool, overrides: SlidesEnv) -> Result<(), ConfigureError> {
    let mut configure = Configure::new(base_path, force)?;
    configure.update_env(overrides)?;
    configure.autodiscover_lessons()?;
    configure.configure_lessons()?;
    Ok(())
}
