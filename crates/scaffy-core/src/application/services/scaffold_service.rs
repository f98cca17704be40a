//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Prepare the target directory (sequential)
//! 2. Render and write one file per language (one thread per language)
//! 3. Roll back everything this call created if any unit failed
//!
//! Step 2 is a fan-out/fan-in barrier: every unit runs to completion, even
//! after a sibling has failed, so the rollback sees the full picture.

use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        CancellationToken,
        ports::{EntryKind, Filesystem, TemplateRenderer},
    },
    domain::ScaffoldRequest,
    error::{GenerationFailure, RollbackFailure, ScaffoldError, ScaffoldResult, UnitError},
};

/// Permission bits for generated files (owner read/write).
pub const FILE_MODE: u32 = 0o600;

/// Concurrent, transactional file-scaffolding engine.
pub struct ScaffoldService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Scaffold `request` and return the project directory.
    ///
    /// On failure the filesystem is either restored or the returned
    /// [`GenerationFailure`] lists every artefact that could not be removed.
    #[instrument(
        skip_all,
        fields(
            project = %request.name,
            output_dir = %request.output_dir.display(),
            languages = request.languages.len(),
            force = request.force
        )
    )]
    pub fn scaffold(
        &self,
        token: &CancellationToken,
        request: &ScaffoldRequest,
    ) -> ScaffoldResult<PathBuf> {
        let target_dir = request.target_dir();

        let owns_directory = self.prepare_directory(&target_dir, request.force)?;
        debug!(owns_directory, path = %target_dir.display(), "target directory ready");

        let (created, errors) = self.generate_files(token, &target_dir, request);

        if errors.is_empty() {
            info!(files = created.len(), "scaffold completed");
            return Ok(target_dir);
        }

        let rollback_failures = self.rollback(&target_dir, &created, owns_directory);
        if rollback_failures.is_empty() {
            error!(errors = errors.len(), "failed to scaffold boilerplate");
        } else {
            error!(
                errors = errors.len(),
                rollback_failures = rollback_failures.len(),
                "scaffolding failed and rollback had failures"
            );
        }

        Err(GenerationFailure::new(errors, rollback_failures).into())
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Ensure `target_dir` exists. Returns `true` when this call created it.
    fn prepare_directory(&self, target_dir: &Path, force: bool) -> ScaffoldResult<bool> {
        let existed = match self.filesystem.stat(target_dir) {
            Ok(EntryKind::Directory) => true,
            Ok(_) => {
                return Err(ScaffoldError::NotADirectory {
                    path: target_dir.to_path_buf(),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(source) => {
                return Err(ScaffoldError::Inspect {
                    path: target_dir.to_path_buf(),
                    source,
                });
            }
        };

        if existed && !force {
            return Err(ScaffoldError::DirectoryAlreadyExists {
                path: target_dir.to_path_buf(),
            });
        }

        self.filesystem
            .create_dir_all(target_dir)
            .map_err(|source| ScaffoldError::CreateDirectory {
                path: target_dir.to_path_buf(),
                source,
            })?;

        Ok(!existed)
    }

    /// Run one unit per language and wait for all of them.
    ///
    /// Errors come back in ascending language order; created paths in
    /// completion order.
    fn generate_files(
        &self,
        token: &CancellationToken,
        target_dir: &Path,
        request: &ScaffoldRequest,
    ) -> (Vec<PathBuf>, Vec<UnitError>) {
        let created = Mutex::new(Vec::with_capacity(request.languages.len()));

        let errors = thread::scope(|scope| {
            let handles: Vec<_> = request
                .languages
                .iter()
                .map(|(language, extension)| {
                    let created = &created;
                    let handle = scope.spawn(move || {
                        self.generate_one(token, target_dir, request, language, extension, created)
                    });
                    (language, handle)
                })
                .collect();

            handles
                .into_iter()
                .filter_map(|(language, handle)| match handle.join() {
                    Ok(result) => result.err(),
                    Err(payload) => Some(UnitError::Panicked {
                        language: language.clone(),
                        message: panic_message(payload.as_ref()),
                    }),
                })
                .collect::<Vec<_>>()
        });

        (created.into_inner(), errors)
    }

    /// Render and write a single language's file.
    fn generate_one(
        &self,
        token: &CancellationToken,
        target_dir: &Path,
        request: &ScaffoldRequest,
        language: &str,
        extension: &str,
        created: &Mutex<Vec<PathBuf>>,
    ) -> Result<(), UnitError> {
        token.check().map_err(|reason| UnitError::Cancelled {
            language: language.into(),
            reason,
        })?;

        let contents = self
            .renderer
            .render(language)
            .map_err(|source| UnitError::Render {
                language: language.into(),
                source,
            })?;

        let path = request.file_path(target_dir, extension);
        self.filesystem
            .write_file(&path, &contents, FILE_MODE)
            .map_err(|source| UnitError::Write {
                language: language.into(),
                path: path.clone(),
                source,
            })?;

        debug!(language, path = %path.display(), bytes = contents.len(), "file written");
        created.lock().push(path);
        Ok(())
    }

    /// Undo what this call created. Returns the steps that failed.
    fn rollback(
        &self,
        target_dir: &Path,
        created: &[PathBuf],
        owns_directory: bool,
    ) -> Vec<RollbackFailure> {
        let mut failures = Vec::new();

        for file in created {
            if let Err(e) = self.filesystem.remove(file) {
                if e.kind() != io::ErrorKind::NotFound {
                    failures.push(RollbackFailure::new(file, e));
                }
            }
        }

        if owns_directory {
            if let Err(e) = self.filesystem.remove_dir_all(target_dir) {
                if e.kind() != io::ErrorKind::NotFound {
                    failures.push(RollbackFailure::new(target_dir, e));
                }
            }
            return failures;
        }

        // Pre-existing directory: only tidy it away if we left it empty.
        if let Ok(entries) = self.filesystem.read_dir(target_dir) {
            if entries.is_empty() {
                if let Err(e) = self.filesystem.remove(target_dir) {
                    warn!(path = %target_dir.display(), error = %e, "could not remove empty directory");
                }
            }
        }

        failures
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        Cancelled, RenderError,
        ports::{MockFilesystem, MockTemplateRenderer},
    };

    const TARGET: &str = "out/myapp";

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "not found")
    }

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
    }

    fn request(langs: &[(&str, &str)]) -> ScaffoldRequest {
        ScaffoldRequest::new("myapp", "out").with_languages(langs.iter().copied())
    }

    fn renderer_ok() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|lang| Ok(format!("// {lang}\n").into_bytes()));
        renderer
    }

    /// Filesystem where the target does not exist yet and writes succeed.
    fn fresh_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_stat().returning(|_| Err(not_found()));
        fs.expect_create_dir_all().times(1).returning(|_| Ok(()));
        fs
    }

    fn service(renderer: MockTemplateRenderer, fs: MockFilesystem) -> ScaffoldService {
        ScaffoldService::new(Box::new(renderer), Box::new(fs))
    }

    #[test]
    fn success_writes_one_file_per_language() {
        let mut fs = fresh_fs();
        fs.expect_write_file()
            .times(2)
            .returning(|path, contents, mode| {
                assert_eq!(mode, FILE_MODE);
                assert!(path.starts_with(TARGET));
                assert!(!contents.is_empty());
                Ok(())
            });
        fs.expect_remove().never();
        fs.expect_remove_dir_all().never();

        let svc = service(renderer_ok(), fs);
        let dir = svc
            .scaffold(&CancellationToken::new(), &request(&[("go", "go"), ("python", "py")]))
            .unwrap();
        assert_eq!(dir, PathBuf::from(TARGET));
    }

    #[test]
    fn empty_language_map_only_prepares_directory() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let mut fs = fresh_fs();
        fs.expect_write_file().never();

        let svc = service(renderer, fs);
        assert!(svc.scaffold(&CancellationToken::new(), &request(&[])).is_ok());
    }

    #[test]
    fn existing_directory_without_force_touches_nothing() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let mut fs = MockFilesystem::new();
        fs.expect_stat().returning(|_| Ok(EntryKind::Directory));
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let err = service(renderer, fs)
            .scaffold(&CancellationToken::new(), &request(&[("go", "go")]))
            .unwrap_err();
        assert!(err.is_already_exists());
        assert!(err.to_string().contains(TARGET));
    }

    #[test]
    fn file_at_target_path_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_stat().returning(|_| Ok(EntryKind::File));
        fs.expect_create_dir_all().never();

        let err = service(MockTemplateRenderer::new(), fs)
            .scaffold(&CancellationToken::new(), &request(&[("go", "go")]).with_force(true))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::NotADirectory { .. }));
    }

    #[test]
    fn stat_failure_aborts_before_creation() {
        let mut fs = MockFilesystem::new();
        fs.expect_stat().returning(|_| Err(denied()));
        fs.expect_create_dir_all().never();

        let err = service(MockTemplateRenderer::new(), fs)
            .scaffold(&CancellationToken::new(), &request(&[("go", "go")]))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Inspect { .. }));
        assert!(err.to_string().starts_with("failed to check directory"));
    }

    #[test]
    fn mkdir_failure_is_wrapped() {
        let mut fs = MockFilesystem::new();
        fs.expect_stat().returning(|_| Err(not_found()));
        fs.expect_create_dir_all().returning(|_| Err(denied()));
        fs.expect_write_file().never();

        let err = service(MockTemplateRenderer::new(), fs)
            .scaffold(&CancellationToken::new(), &request(&[("go", "go")]))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::CreateDirectory { .. }));
        assert!(err.to_string().starts_with("failed to create directory"));
    }

    #[test]
    fn render_failure_rolls_back_sibling_and_owned_directory() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|lang| {
            if lang == "python" {
                Err(RenderError::TemplateNotFound {
                    language: lang.into(),
                })
            } else {
                Ok(b"package main\n".to_vec())
            }
        });

        let mut fs = fresh_fs();
        fs.expect_write_file().times(1).returning(|_, _, _| Ok(()));
        fs.expect_remove()
            .times(1)
            .withf(|path| path.ends_with("out/myapp/myapp.go"))
            .returning(|_| Ok(()));
        fs.expect_remove_dir_all()
            .times(1)
            .withf(|path| path.ends_with(TARGET))
            .returning(|_| Ok(()));
        fs.expect_read_dir().never();

        let err = service(renderer, fs)
            .scaffold(&CancellationToken::new(), &request(&[("go", "go"), ("python", "py")]))
            .unwrap_err();

        let failure = err.generation().unwrap();
        assert_eq!(failure.errors().len(), 1);
        assert_eq!(failure.errors()[0].language(), "python");
        assert!(failure.rollback_succeeded());
        assert!(err.to_string().contains("all created files have been cleaned up"));
    }

    #[test]
    fn errors_are_reported_in_language_order() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|lang| {
            Err(RenderError::Execution {
                template: format!("{lang}.tmpl"),
                message: "boom".into(),
            })
        });
        let mut fs = fresh_fs();
        fs.expect_remove_dir_all().returning(|_| Ok(()));

        let err = service(renderer, fs)
            .scaffold(
                &CancellationToken::new(),
                &request(&[("python", "py"), ("c", "c"), ("go", "go")]),
            )
            .unwrap_err();

        let langs: Vec<_> = err
            .generation()
            .unwrap()
            .errors()
            .iter()
            .map(UnitError::language)
            .collect();
        assert_eq!(langs, ["c", "go", "python"]);
    }

    #[test]
    fn forced_reuse_never_removes_populated_directory() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|lang| {
            Err(RenderError::TemplateNotFound {
                language: lang.into(),
            })
        });

        let mut fs = MockFilesystem::new();
        fs.expect_stat().returning(|_| Ok(EntryKind::Directory));
        fs.expect_create_dir_all().times(1).returning(|_| Ok(()));
        fs.expect_remove_dir_all().never();
        fs.expect_read_dir()
            .times(1)
            .returning(|_| Ok(vec![PathBuf::from("out/myapp/notes.txt")]));
        fs.expect_remove().never();

        let err = service(renderer, fs)
            .scaffold(&CancellationToken::new(), &request(&[("go", "go")]).with_force(true))
            .unwrap_err();
        assert!(err.generation().unwrap().rollback_succeeded());
    }

    #[test]
    fn forced_reuse_removes_directory_left_empty() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|lang| {
            Err(RenderError::TemplateNotFound {
                language: lang.into(),
            })
        });

        let mut fs = MockFilesystem::new();
        fs.expect_stat().returning(|_| Ok(EntryKind::Directory));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_remove_dir_all().never();
        fs.expect_read_dir().returning(|_| Ok(Vec::new()));
        fs.expect_remove()
            .times(1)
            .withf(|path| path.ends_with(TARGET))
            .returning(|_| Err(denied()));

        // A failed best-effort removal of a caller-owned directory is not a
        // rollback failure.
        let err = service(renderer, fs)
            .scaffold(&CancellationToken::new(), &request(&[("go", "go")]).with_force(true))
            .unwrap_err();
        assert!(err.generation().unwrap().rollback_succeeded());
    }

    #[test]
    fn cancelled_token_skips_rendering_and_removes_owned_directory() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let mut fs = fresh_fs();
        fs.expect_write_file().never();
        fs.expect_remove_dir_all().times(1).returning(|_| Ok(()));

        let token = CancellationToken::new();
        token.cancel();

        let err = service(renderer, fs)
            .scaffold(&token, &request(&[("go", "go"), ("c", "c")]))
            .unwrap_err();

        let failure = err.generation().unwrap();
        assert!(failure.was_cancelled());
        assert_eq!(failure.errors().len(), 2);
        assert!(
            failure
                .errors()
                .iter()
                .all(|e| matches!(e, UnitError::Cancelled { reason: Cancelled::Cancelled, .. }))
        );
        assert!(err.to_string().contains("operation cancelled"));
    }

    #[test]
    fn rollback_failures_are_surfaced_with_generation_errors() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|lang| {
            if lang == "c" {
                Err(RenderError::TemplateNotFound {
                    language: lang.into(),
                })
            } else {
                Ok(b"x".to_vec())
            }
        });

        let mut fs = fresh_fs();
        fs.expect_write_file().returning(|_, _, _| Ok(()));
        fs.expect_remove().returning(|_| Err(io::Error::other("device busy")));
        fs.expect_remove_dir_all().returning(|_| Ok(()));

        let err = service(renderer, fs)
            .scaffold(&CancellationToken::new(), &request(&[("c", "c"), ("go", "go")]))
            .unwrap_err();

        let failure = err.generation().unwrap();
        assert!(!failure.rollback_succeeded());
        assert_eq!(failure.rollback_failures().len(), 1);

        let msg = err.to_string();
        assert!(msg.contains("1 error(s) and rollback had 1 failure(s)"));
        assert!(msg.contains("out/myapp/myapp.go: device busy"));
    }
}
