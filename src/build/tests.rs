// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::{Arc, Mutex};

use anyhow::Result;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::test_utils::{dry_run_messages, run_with_logs};
use super::{BuildContext, BuildTool, purge_cache, recreate_dir, run_build};
use crate::config::Config;
use crate::error::BuildError;
use crate::recipe::definitions::Definitions;
use crate::recipe::options::Options;
use crate::recipe::plan::BuildType;
use crate::recipe::settings::{Arch, Compiler, Os, Settings};
use crate::recipe::{Resolution, resolve};

/// Records every call instead of running a build system.
struct RecordingTool {
    multi_config: bool,
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl RecordingTool {
    fn new(multi_config: bool) -> Self {
        Self {
            multi_config,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    fn record(&self, call: String) -> Result<()> {
        let failed = self.fail_on == Some(call.as_str());
        self.calls.lock().expect("calls lock").push(call.clone());
        if failed {
            return Err(BuildError::StepFailed {
                tool: "recording".to_string(),
                step: call,
                message: "exit code 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl BuildTool for RecordingTool {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn is_multi_config(&self) -> bool {
        self.multi_config
    }

    fn configure<'a>(
        &'a self,
        _ctx: &'a BuildContext,
        definitions: &'a Definitions,
        build_type: Option<BuildType>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            assert_eq!(
                definitions.get("CMAKE_BUILD_TYPE"),
                build_type.map(BuildType::as_str),
                "definitions carry the configure build type"
            );
            self.record(format!("configure {}", build_type.map_or("-", BuildType::as_str)))
        })
    }

    fn build<'a>(
        &'a self,
        _ctx: &'a BuildContext,
        build_type: BuildType,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.record(format!("build {build_type}")) })
    }
}

fn linux_resolution() -> Resolution {
    let settings = Settings::for_compiler(Os::Linux, Arch::X86_64, Compiler::Gcc);
    resolve(&Options::default(), &settings).expect("linux settings resolve")
}

fn context(dry_run: bool) -> BuildContext {
    BuildContext::new(Arc::new(Config::default()), CancellationToken::new(), dry_run)
}

#[tokio::test]
async fn test_run_build_multi_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_dir = temp.path().join("build");
    let tool = RecordingTool::new(true);

    run_build(&context(false), &tool, &linux_resolution(), &build_dir)
        .await
        .expect("build succeeds");

    insta::assert_snapshot!(tool.calls().join(" | "), @"configure - | build Debug | build Release");
    assert!(build_dir.is_dir());
}

#[tokio::test]
async fn test_run_build_single_config_purges_cache() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_dir = temp.path().join("build");
    let tool = RecordingTool::new(false);

    run_build(&context(false), &tool, &linux_resolution(), &build_dir)
        .await
        .expect("build succeeds");

    insta::assert_snapshot!(
        tool.calls().join(" | "),
        @"configure Debug | build Debug | configure Release | build Release"
    );
}

#[tokio::test]
async fn test_run_build_recreates_build_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_dir = temp.path().join("build");
    std::fs::create_dir_all(build_dir.join("stale")).expect("create stale dir");
    std::fs::write(build_dir.join("stale/old.o"), "").expect("write stale file");

    run_build(&context(false), &RecordingTool::new(true), &linux_resolution(), &build_dir)
        .await
        .expect("build succeeds");

    assert!(build_dir.is_dir());
    assert!(!build_dir.join("stale").exists());
}

#[tokio::test]
async fn test_run_build_stops_at_first_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let tool = RecordingTool::new(false).failing_on("build Debug");

    let err = run_build(&context(false), &tool, &linux_resolution(), temp.path())
        .await
        .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"recording build Debug failed: exit code 1");
    insta::assert_snapshot!(tool.calls().join(" | "), @"configure Debug | build Debug");
}

#[tokio::test]
async fn test_run_build_cancelled_before_first_step() {
    let temp = tempfile::tempdir().expect("tempdir");
    let token = CancellationToken::new();
    token.cancel();
    let ctx = BuildContext::new(Arc::new(Config::default()), token, false);
    let tool = RecordingTool::new(true);

    let err = run_build(&ctx, &tool, &linux_resolution(), temp.path())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::Interrupted { .. })
    ));
    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn test_purge_cache_removes_cache_only() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_dir = temp.path();
    std::fs::write(build_dir.join("CMakeCache.txt"), "CMAKE_BUILD_TYPE=Debug").expect("write cache");
    std::fs::create_dir_all(build_dir.join("CMakeFiles/3.16")).expect("create CMakeFiles");
    std::fs::create_dir_all(build_dir.join("lib")).expect("create lib");
    std::fs::write(build_dir.join("lib/libPocoFoundationd.a"), "").expect("write lib");

    purge_cache(&context(false), build_dir)
        .await
        .expect("purge succeeds");

    assert!(!build_dir.join("CMakeCache.txt").exists());
    assert!(!build_dir.join("CMakeFiles").exists());
    assert!(build_dir.join("lib/libPocoFoundationd.a").exists());

    // nothing left to purge is fine
    purge_cache(&context(false), build_dir)
        .await
        .expect("second purge succeeds");
}

#[tokio::test(flavor = "current_thread")]
async fn test_dry_run_touches_nothing() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let build_dir = temp.path().join("build");
    let dir = build_dir.clone();

    let logs = run_with_logs(|| async move {
        let ctx = context(true);
        recreate_dir(&ctx, &dir).await?;
        purge_cache(&ctx, &dir).await
    })
    .await?;

    assert!(!build_dir.exists());
    insta::assert_snapshot!(dry_run_messages(&logs).join("\n"), @r"
    [dry-run] Would recreate directory
    [dry-run] Would purge CMake cache
    ");
    Ok(())
}
