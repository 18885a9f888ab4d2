//! Orchestrates a complete `install` or `update` run.
//!
//! Both commands follow the same three phases:
//! 1. Fetch - build the dependency tree by fetching the requested packages
//!    and, recursively, everything their lock files name
//! 2. Resolve - find sources requested at more than one ref
//! 3. Apply - check each conflicting package's own working copy out at its
//!    canonical ref
//!
//! The apply phase only touches the working copy of the package that won.
//! Other packages that share its source under a different name keep the ref
//! they were fetched at.

use std::path::PathBuf;

use crate::config::RunOptions;
use crate::defaults::{LOCK_FILE, PACKAGE_FILE};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::manifest::Manifest;
use crate::output;
use crate::repository::SourceControl;
use crate::resolve::{resolve, ConflictReport};
use crate::tree::DependencyTree;
use crate::workspace::Workspace;

/// Everything a run needs from its surroundings.
pub struct Context<'a> {
    pub git: &'a dyn SourceControl,
    pub workspace: &'a Workspace,
    /// Directory holding `packages.json` and `packages.lock`.
    pub project_dir: PathBuf,
    pub options: RunOptions,
}

/// What a run fetched and which conflicts it resolved.
#[derive(Debug)]
pub struct Outcome {
    pub tree: DependencyTree,
    pub report: ConflictReport,
}

/// Install the packages pinned in `packages.lock`, or just `name`.
pub fn install(ctx: &Context<'_>, name: Option<&str>) -> Result<Outcome> {
    let mut lock = Manifest::load(&ctx.project_dir.join(LOCK_FILE))?;
    let mut tree = DependencyTree::new();
    let root = tree.root();
    let mut fetcher = Fetcher::new(ctx.git, ctx.workspace);

    match name {
        Some(name) => {
            let mut package = lock.package(name, LOCK_FILE)?.clone();
            fetcher.fetch(&mut tree, root, &mut package)?;
        }
        None => {
            fetcher.fetch_all(&mut tree, root, &mut lock)?;
            if let Some(repository) = &lock.repository {
                ctx.workspace
                    .link_repository(repository, &ctx.project_dir)?;
            }
        }
    }

    finish(&fetcher, tree)
}

/// Fetch the latest revisions for `packages.json` and record them in
/// `packages.lock`. With `name`, only that package is refreshed and only its
/// lock entry is replaced.
pub fn update(ctx: &Context<'_>, name: Option<&str>) -> Result<Outcome> {
    let mut manifest = Manifest::load(&ctx.project_dir.join(PACKAGE_FILE))?;
    let lock_path = ctx.project_dir.join(LOCK_FILE);
    let mut tree = DependencyTree::new();
    let root = tree.root();
    let mut fetcher = Fetcher::new(ctx.git, ctx.workspace);

    let lock = match name {
        Some(name) => {
            let mut package = manifest.package(name, PACKAGE_FILE)?.clone();
            fetcher.fetch(&mut tree, root, &mut package)?;

            let mut lock = Manifest::load_or_default(&lock_path)?;
            lock.insert(package);
            lock
        }
        None => {
            fetcher.fetch_all(&mut tree, root, &mut manifest)?;
            if let Some(repository) = &manifest.repository {
                ctx.workspace
                    .link_repository(repository, &ctx.project_dir)?;
            }
            manifest
        }
    };

    if ctx.options.executes() {
        lock.save(&lock_path)?;
        log::info!("wrote {}", lock_path.display());
    } else {
        println!("would write {}", lock_path.display());
    }

    finish(&fetcher, tree)
}

/// Resolve conflicts in `tree`, report them, and re-pin the winners.
fn finish(fetcher: &Fetcher<'_>, tree: DependencyTree) -> Result<Outcome> {
    let report = resolve(&tree);
    if !report.is_empty() {
        print!("{}", output::conflict(report.render(&tree)));
        apply_resolutions(fetcher, &tree, &report)?;
        println!(
            "Version conflicts were detected. If the build fails, you may want to see if that's a problem."
        );
    }
    Ok(Outcome { tree, report })
}

/// Check out every canonical descriptor in its own working copy.
pub fn apply_resolutions(
    fetcher: &Fetcher<'_>,
    tree: &DependencyTree,
    report: &ConflictReport,
) -> Result<()> {
    for mut package in report.resolved(tree) {
        println!(
            "{}",
            output::resolution(format!("resolving {} to {}", package.name, package.git_ref()))
        );
        fetcher.update(&mut package)?;
    }
    Ok(())
}
