// tests/publish_behaviour.rs

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use vfswatch::snapshot::{
    FileSnapshot, NodeDiffListener, NoopDiffListener, PathHierarchy, UpdateFunctionRunner,
};
use vfswatch::vfs::{NotifyingUpdateFunctionRunner, WatchingVirtualFileSystem};
use vfswatch::watch::WatchFilter;
use vfswatch_test_utils::init_tracing;
use vfswatch_test_utils::recording::{
    PublishMode, RecordingErrorHandler, RecordingListener,
};

fn project_filter() -> Arc<dyn WatchFilter> {
    Arc::new(|path: &str| path.starts_with("/project"))
}

fn set(paths: &[&str]) -> HashSet<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

fn run<F>(
    runner: &dyn UpdateFunctionRunner<PathHierarchy>,
    root: &PathHierarchy,
    update: F,
) -> PathHierarchy
where
    F: FnOnce(&PathHierarchy, &mut dyn NodeDiffListener) -> PathHierarchy,
{
    runner.run_update(Box::new(update), root)
}

#[test]
fn published_diff_only_contains_watched_paths() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    let handler = Arc::new(RecordingErrorHandler::<PathHierarchy>::running());
    runner.arm(Arc::new(listener.clone()), handler.clone());

    run(&runner, &PathHierarchy::empty(), |h, diff| {
        diff.node_added("/project/a");
        diff.node_added("/tmp/b");
        h.clone()
    });

    let calls = listener.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].added, set(&["/project/a"]));
    assert!(calls[0].removed.is_empty());
    assert_eq!(handler.outcomes(), vec![Ok(())]);
}

#[test]
fn duplicate_reports_are_collapsed() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    runner.arm(
        Arc::new(listener.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );

    run(&runner, &PathHierarchy::empty(), |h, diff| {
        diff.node_removed("/project/gone");
        diff.node_removed("/project/gone");
        diff.node_added("/project/new");
        diff.node_added("/project/new");
        h.clone()
    });

    let calls = listener.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].added, set(&["/project/new"]));
    assert_eq!(calls[0].removed, set(&["/project/gone"]));
}

#[test]
fn empty_diff_still_notifies_once() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    runner.arm(
        Arc::new(listener.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );

    run(&runner, &PathHierarchy::empty(), |h, diff| {
        diff.node_added("/elsewhere/file");
        h.clone()
    });

    let calls = listener.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].added.is_empty());
    assert!(calls[0].removed.is_empty());
}

#[test]
fn error_handler_receives_the_updated_root() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let handler = Arc::new(RecordingErrorHandler::<PathHierarchy>::new(PublishMode::Skip));
    runner.arm(Arc::new(RecordingListener::new()), handler.clone());

    let before = PathHierarchy::empty();
    let after = run(&runner, &before, |h, diff| {
        h.store("/project/a.rs", FileSnapshot::regular_file(b"fn main() {}"), diff)
    });

    let roots = handler.roots();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].hierarchy().ptr_eq(&after));
    assert!(roots[0].hierarchy().get("/project/a.rs").is_some());
    assert!(before.is_empty());
}

#[test]
fn published_root_does_not_notify_again() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    let handler = Arc::new(RecordingErrorHandler::<PathHierarchy>::running());
    runner.arm(Arc::new(listener.clone()), handler.clone());

    run(&runner, &PathHierarchy::empty(), |h, diff| {
        h.store("/project/one", FileSnapshot::directory(), diff)
    });
    assert_eq!(listener.call_count(), 1);

    let mut published = handler.roots().remove(0);
    published.update(|h, diff| h.store("/project/two", FileSnapshot::directory(), diff));

    assert_eq!(listener.call_count(), 1);
    assert!(published.hierarchy().get("/project/two").is_some());
}

#[test]
fn runner_binding_persists_until_disarmed() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    runner.arm(
        Arc::new(listener.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );

    let first = run(&runner, &PathHierarchy::empty(), |h, diff| {
        h.store("/project/a", FileSnapshot::directory(), diff)
    });
    let second = run(&runner, &first, |h, diff| {
        h.store("/project/b", FileSnapshot::directory(), diff)
    });
    assert_eq!(listener.call_count(), 2);
    assert_eq!(listener.calls()[1].added, set(&["/project/b"]));

    runner.disarm();
    assert!(!runner.is_armed());
    run(&runner, &second, |h, diff| h.invalidate("/project", diff));
    assert_eq!(listener.call_count(), 2);
}

#[test]
fn rearming_switches_listener_for_later_updates_only() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let first = RecordingListener::new();
    let second = RecordingListener::new();
    runner.arm(
        Arc::new(first.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );

    let h = run(&runner, &PathHierarchy::empty(), |h, diff| {
        h.store("/project/a", FileSnapshot::directory(), diff)
    });

    runner.arm(
        Arc::new(second.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );
    run(&runner, &h, |h, diff| h.invalidate("/project/a", diff));

    assert_eq!(first.call_count(), 1);
    assert_eq!(first.calls()[0].added, set(&["/project/a"]));
    assert_eq!(second.call_count(), 1);
    assert_eq!(second.calls()[0].removed, set(&["/project/a"]));
}

#[test]
fn update_function_panic_propagates_without_notifying() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    let handler = Arc::new(RecordingErrorHandler::<PathHierarchy>::running());
    runner.arm(Arc::new(listener.clone()), handler.clone());

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run(&runner, &PathHierarchy::empty(), |_, diff| {
            diff.node_added("/project/half-done");
            panic!("update function failed");
        })
    }));

    assert!(result.is_err());
    assert_eq!(listener.call_count(), 0);
    assert!(handler.roots().is_empty());
    assert!(runner.is_armed());
}

#[test]
fn diffs_do_not_leak_between_updates() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    runner.arm(
        Arc::new(listener.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );

    let h = run(&runner, &PathHierarchy::empty(), |h, diff| {
        h.store("/project/a", FileSnapshot::directory(), diff)
    });
    run(&runner, &h, |h, diff| {
        h.store("/project/b", FileSnapshot::directory(), diff)
    });

    let calls = listener.calls();
    assert_eq!(calls[0].added, set(&["/project/a"]));
    assert_eq!(calls[1].added, set(&["/project/b"]));
}

#[test]
fn watching_vfs_notifies_only_while_watching() {
    init_tracing();

    let mut vfs = WatchingVirtualFileSystem::new(PathHierarchy::empty(), project_filter());
    let listener = RecordingListener::new();

    vfs.update(|h, diff| h.store("/project/early", FileSnapshot::directory(), diff));
    assert!(!vfs.is_watching());
    assert_eq!(listener.call_count(), 0);

    vfs.start_watching(
        Arc::new(listener.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );
    vfs.update(|h, diff| h.store("/project/late", FileSnapshot::directory(), diff));
    vfs.update(|h, diff| h.invalidate("/project/early", diff));

    vfs.stop_watching();
    vfs.update(|h, diff| h.invalidate("/project", diff));

    let calls = listener.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].added, set(&["/project/late"]));
    assert_eq!(calls[1].removed, set(&["/project/early"]));
    assert!(vfs.hierarchy().is_empty());
}

#[test]
fn replacing_a_snapshot_reports_removal_and_addition() {
    init_tracing();

    let runner = NotifyingUpdateFunctionRunner::<PathHierarchy>::new(project_filter());
    let listener = RecordingListener::new();
    let base = PathHierarchy::empty().store(
        "/project/a.txt",
        FileSnapshot::regular_file(b"old"),
        &mut NoopDiffListener,
    );
    runner.arm(
        Arc::new(listener.clone()),
        Arc::new(RecordingErrorHandler::<PathHierarchy>::running()),
    );

    run(&runner, &base, |h, diff| {
        h.store("/project/a.txt", FileSnapshot::regular_file(b"new"), diff)
    });

    let calls = listener.calls();
    assert_eq!(calls[0].added, set(&["/project/a.txt"]));
    assert_eq!(calls[0].removed, set(&["/project/a.txt"]));
}
