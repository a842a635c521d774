//! CMake invocation.
//!
//! Runs one synchronous configure step per [`BuildJob`]. Build-directory
//! cleanup is best-effort and the listener's `after_build` always runs once
//! the listener's `before_build` has run.

use super::job::{BuildError, BuildJob, BuildListener, BuildOutcome};
use crate::config::ToolConfig;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Runs CMake for a configured job, notifying a listener around the call.
pub struct BuildRunner<L: BuildListener> {
    config: ToolConfig,
    listener: L,
    job: Option<BuildJob>,
}

impl<L: BuildListener> BuildRunner<L> {
    /// Create a new BuildRunner.
    pub fn new(config: ToolConfig, listener: L) -> Self {
        Self {
            config,
            listener,
            job: None,
        }
    }

    /// Set the job for the next `build()`.
    pub fn configure(&mut self, job: BuildJob) {
        self.job = Some(job);
    }

    pub fn job(&self) -> Option<&BuildJob> {
        self.job.as_ref()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Run the configured job.
    pub fn build(&mut self) -> Result<BuildOutcome, BuildError> {
        let job = self.job.as_ref().ok_or(BuildError::NotConfigured)?;
        let build_dir = job.build_dir();
        prepare_build_dir(&build_dir);

        let args = self.config.cmake_args();
        let mut command = Command::new(&self.config.cmake_program);
        command
            .args(&args)
            .current_dir(&build_dir)
            .env(&self.config.host_root_var, job.host_root());

        self.listener.before_build();
        std::thread::sleep(self.config.settle_delay);

        tracing::info!(
            program = %self.config.cmake_program,
            ?args,
            cwd = %build_dir.display(),
            "running CMake"
        );
        let status = command.status();

        self.listener.after_build();

        match status {
            Ok(status) => {
                let outcome = BuildOutcome {
                    exit_code: status.code(),
                };
                tracing::info!(exit_code = ?outcome.exit_code, "CMake finished");
                Ok(outcome)
            }
            Err(source) => {
                tracing::warn!(error = %source, "CMake could not be started");
                Err(BuildError::Launch {
                    program: self.config.cmake_program.clone(),
                    source,
                })
            }
        }
    }
}

/// Recreate `build_dir` empty. Only the last component is created, so a
/// missing project directory surfaces as a launch error. Failures are
/// logged; the command launch reports a missing directory on its own.
fn prepare_build_dir(build_dir: &Path) {
    if build_dir.exists() {
        if let Err(err) = fs::remove_dir_all(build_dir) {
            tracing::warn!(path = %build_dir.display(), error = %err, "failed to clear build directory");
        }
    }

    if !build_dir.exists() {
        if let Err(err) = fs::create_dir(build_dir) {
            tracing::warn!(path = %build_dir.display(), error = %err, "failed to create build directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::EnvironmentGuard;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct RecordingListener {
        events: Vec<&'static str>,
    }

    impl BuildListener for RecordingListener {
        fn before_build(&mut self) {
            self.events.push("before");
        }

        fn after_build(&mut self) {
            self.events.push("after");
        }
    }

    fn fast_config(program: &str) -> ToolConfig {
        ToolConfig {
            cmake_program: program.to_string(),
            settle_delay: Duration::ZERO,
            ..ToolConfig::default()
        }
    }

    #[test]
    fn test_build_without_job_fires_nothing() {
        let mut runner = BuildRunner::new(fast_config("cmake"), RecordingListener::default());

        let result = runner.build();

        assert!(matches!(result, Err(BuildError::NotConfigured)));
        assert!(runner.listener().events.is_empty());
    }

    #[test]
    fn test_launch_failure_still_restores() {
        let project = tempfile::tempdir().unwrap();
        let mut runner = BuildRunner::new(
            fast_config("hdk-cmake-missing-program"),
            RecordingListener::default(),
        );
        runner.configure(BuildJob::new(project.path(), "/opt/hfs18.5.696").unwrap());

        let result = runner.build();

        assert!(matches!(result, Err(BuildError::Launch { .. })));
        assert_eq!(runner.listener().events, ["before", "after"]);
        assert!(project.path().join("build").is_dir());
    }

    #[test]
    fn test_missing_project_is_not_created() {
        let scratch = tempfile::tempdir().unwrap();
        let project = scratch.path().join("does/not/exist");
        let mut runner = BuildRunner::new(fast_config("cmake"), RecordingListener::default());
        runner.configure(BuildJob::new(&project, "/opt/hfs18.5.696").unwrap());

        let result = runner.build();

        assert!(matches!(result, Err(BuildError::Launch { .. })));
        assert!(!scratch.path().join("does").exists());
        assert_eq!(runner.listener().events, ["before", "after"]);
    }

    #[test]
    fn test_stale_build_dir_is_recreated_empty() {
        let project = tempfile::tempdir().unwrap();
        let build_dir = project.path().join("build");
        fs::create_dir_all(build_dir.join("CMakeFiles")).unwrap();
        fs::write(build_dir.join("CMakeCache.txt"), "stale").unwrap();

        prepare_build_dir(&build_dir);

        assert!(build_dir.is_dir());
        assert_eq!(fs::read_dir(&build_dir).unwrap().count(), 0);
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        /// Writes a stand-in for cmake that records what it saw into `out`.
        fn fake_cmake(dir: &Path, out: &Path, env_root: &Path, exit_code: i32) -> PathBuf {
            let script = dir.join("fake-cmake.sh");
            let body = format!(
                "#!/bin/sh\n\
                 pwd > '{out}/cwd'\n\
                 printf '%s' \"$HFS\" > '{out}/hfs'\n\
                 ls -A . > '{out}/build_contents'\n\
                 ls -A '{env}' > '{out}/env_contents'\n\
                 echo \"$@\" > '{out}/args'\n\
                 exit {exit_code}\n",
                out = out.display(),
                env = env_root.display(),
            );
            fs::write(&script, body).unwrap();
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
            script
        }

        fn read(path: PathBuf) -> String {
            fs::read_to_string(path).unwrap().trim_end().to_string()
        }

        fn run_scenario(exit_code: i32) {
            let scratch = tempfile::tempdir().unwrap();
            let project = scratch.path().join("proj");
            let host_root = scratch.path().join("hfs18.5.696");
            let env_root = scratch.path().join("houdini18.5");
            let out = scratch.path().join("out");
            for dir in [&project, &host_root, &env_root, &out] {
                fs::create_dir_all(dir).unwrap();
            }
            fs::create_dir(env_root.join("packages")).unwrap();
            fs::write(env_root.join("houdini.env"), "").unwrap();
            fs::create_dir_all(project.join("build/old")).unwrap();

            let script = fake_cmake(scratch.path(), &out, &env_root, exit_code);
            let mut runner = BuildRunner::new(
                fast_config(&script.to_string_lossy()),
                EnvironmentGuard::new(Some(&env_root)),
            );
            runner.configure(BuildJob::new(&project, &host_root).unwrap());

            let outcome = runner.build().unwrap();

            assert_eq!(outcome.exit_code, Some(exit_code));
            assert_eq!(
                fs::canonicalize(read(out.join("cwd"))).unwrap(),
                fs::canonicalize(project.join("build")).unwrap()
            );
            assert_eq!(read(out.join("hfs")), host_root.to_string_lossy());
            assert_eq!(read(out.join("build_contents")), "");
            assert_eq!(
                read(out.join("env_contents")),
                "houdini.env_back\npackages_back"
            );
            assert_eq!(read(out.join("args")), "-G Visual Studio 15 2017 -A x64 ..");

            assert!(env_root.join("packages").is_dir());
            assert!(env_root.join("houdini.env").is_file());
            assert!(!env_root.join("packages_back").exists());
            assert!(!env_root.join("houdini.env_back").exists());
        }

        #[test]
        fn test_scenario_successful_build() {
            run_scenario(0);
        }

        #[test]
        fn test_scenario_failing_build_still_restores() {
            run_scenario(3);
        }

        #[test]
        fn test_after_fires_once_on_nonzero_exit() {
            let project = tempfile::tempdir().unwrap();
            let mut runner = BuildRunner::new(fast_config("false"), RecordingListener::default());
            runner.configure(BuildJob::new(project.path(), "/opt/hfs18.5.696").unwrap());

            let outcome = runner.build().unwrap();

            assert!(!outcome.success());
            assert_eq!(runner.listener().events, ["before", "after"]);
        }

        #[test]
        fn test_after_fires_when_build_dir_cannot_be_created() {
            let scratch = tempfile::tempdir().unwrap();
            // A file where the project directory should be blocks `build/`.
            let project = scratch.path().join("not-a-dir");
            fs::write(&project, "").unwrap();

            let mut runner = BuildRunner::new(fast_config("true"), RecordingListener::default());
            runner.configure(BuildJob::new(&project, "/opt/hfs18.5.696").unwrap());

            let result = runner.build();

            assert!(matches!(result, Err(BuildError::Launch { .. })));
            assert_eq!(runner.listener().events, ["before", "after"]);
        }
    }
}
