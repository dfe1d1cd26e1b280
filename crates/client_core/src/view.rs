//! The course directory component: one actor task owning the canonical
//! collection, the search text and the debounce timer.

use std::{sync::Arc, time::Duration};

use shared::domain::Course;
use tokio::{
    runtime::Handle,
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::debug;

use crate::{
    config::Settings,
    debounce::Debouncer,
    loader::{load_collection, LoadOutcome},
    render::RenderState,
    search::visible_subset,
    source::CourseSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub quiet_period: Duration,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ViewOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            quiet_period: settings.quiet_period(),
        }
    }
}

/// Immutable state published after every change.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub loading: bool,
    /// The fetch failed. Renderers still show the empty-result state.
    pub load_failed: bool,
    /// Raw input, echoed as soon as it is received.
    pub search_text: String,
    /// Text the visible subset was last computed from.
    pub applied_query: String,
    pub visible: Arc<[Course]>,
    pub total: usize,
    pub quarantined: usize,
    pub recompute_count: u64,
    pub recompute_pending: bool,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            loading: true,
            load_failed: false,
            search_text: String::new(),
            applied_query: String::new(),
            visible: Arc::from(Vec::new()),
            total: 0,
            quarantined: 0,
            recompute_count: 0,
            recompute_pending: false,
        }
    }
}

impl ViewSnapshot {
    pub fn render_state(&self) -> RenderState<'_> {
        RenderState::from_snapshot(self)
    }
}

enum ViewCommand {
    SearchInput(String),
}

enum ViewSignal {
    CollectionLoaded(LoadOutcome),
    FilterDue { generation: u64 },
}

type SnapshotSender = Arc<watch::Sender<Arc<ViewSnapshot>>>;

/// Front-end side of a mounted course directory.
///
/// Dropping the handle tears the view down; a collection response that
/// arrives afterwards is discarded.
pub struct ViewHandle {
    cmd_tx: mpsc::UnboundedSender<ViewCommand>,
    state_tx: SnapshotSender,
    task: JoinHandle<()>,
}

impl ViewHandle {
    /// Mounts on the ambient tokio runtime.
    pub fn mount(source: Arc<dyn CourseSource>, options: ViewOptions) -> Self {
        Self::mount_on(&Handle::current(), source, options)
    }

    pub fn mount_on(runtime: &Handle, source: Arc<dyn CourseSource>, options: ViewOptions) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(Arc::new(ViewSnapshot::default()));
        let state_tx = Arc::new(state_tx);

        let view = CourseDirectoryView {
            source,
            state_tx: state_tx.clone(),
            signal_tx,
            canonical: Arc::from(Vec::new()),
            loaded: false,
            search_text: String::new(),
            applied_query: String::new(),
            recompute_count: 0,
            debouncer: Debouncer::new(options.quiet_period),
        };
        let task = runtime.spawn(view.run(cmd_rx, signal_rx));

        Self {
            cmd_tx,
            state_tx,
            task,
        }
    }

    /// Echoes `text` into the snapshot immediately and (re)starts the quiet
    /// period before the visible subset is recomputed.
    pub fn on_search_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state_tx.send_modify(|snapshot| {
            let snapshot = Arc::make_mut(snapshot);
            snapshot.search_text.clone_from(&text);
        });
        if self.cmd_tx.send(ViewCommand::SearchInput(text)).is_err() {
            debug!("search input after course directory teardown ignored");
        }
    }

    pub fn snapshot(&self) -> Arc<ViewSnapshot> {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewSnapshot>> {
        self.state_tx.subscribe()
    }

    /// Waits until a published snapshot satisfies `predicate`.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&ViewSnapshot) -> bool,
    ) -> Option<Arc<ViewSnapshot>> {
        let mut rx = self.subscribe();
        let snapshot = rx.wait_for(|snapshot| predicate(snapshot)).await.ok()?.clone();
        Some(snapshot)
    }

    pub async fn unmount(self) {
        let Self { cmd_tx, task, .. } = self;
        drop(cmd_tx);
        if let Err(err) = task.await {
            if err.is_panic() {
                tracing::error!("course directory view task panicked: {err}");
            }
        }
    }
}

struct CourseDirectoryView {
    source: Arc<dyn CourseSource>,
    state_tx: SnapshotSender,
    signal_tx: mpsc::UnboundedSender<ViewSignal>,
    canonical: Arc<[Course]>,
    loaded: bool,
    search_text: String,
    applied_query: String,
    recompute_count: u64,
    debouncer: Debouncer,
}

impl CourseDirectoryView {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<ViewCommand>,
        mut signal_rx: mpsc::UnboundedReceiver<ViewSignal>,
    ) {
        self.start_load();
        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(signal) = signal_rx.recv() => self.handle_signal(signal),
            }
        }
        self.debouncer.cancel();
        debug!("course directory view unmounted");
    }

    fn start_load(&self) {
        let source = self.source.clone();
        let signal_tx = self.signal_tx.clone();
        tokio::spawn(async move {
            let outcome = load_collection(source.as_ref()).await;
            if signal_tx
                .send(ViewSignal::CollectionLoaded(outcome))
                .is_err()
            {
                debug!("course collection arrived after teardown; ignoring");
            }
        });
    }

    fn handle_command(&mut self, cmd: ViewCommand) {
        match cmd {
            ViewCommand::SearchInput(text) => {
                debug!(query = %text, "search input");
                self.search_text = text;
                let signal_tx = self.signal_tx.clone();
                self.debouncer.trigger(move |generation| async move {
                    let _ = signal_tx.send(ViewSignal::FilterDue { generation });
                });
                self.publish(|snapshot| snapshot.recompute_pending = true);
            }
        }
    }

    fn handle_signal(&mut self, signal: ViewSignal) {
        match signal {
            ViewSignal::CollectionLoaded(outcome) => self.apply_collection(outcome),
            ViewSignal::FilterDue { generation } => {
                if !self.debouncer.is_current(generation) {
                    debug!(generation, "superseded filter run dropped");
                    return;
                }
                self.debouncer.settle();
                self.applied_query = self.search_text.clone();
                self.recompute_count += 1;
                let visible = self.recompute();
                let applied_query = self.applied_query.clone();
                let recompute_count = self.recompute_count;
                debug!(
                    query = %applied_query,
                    visible = visible.len(),
                    "visible subset recomputed"
                );
                self.publish(move |snapshot| {
                    snapshot.applied_query = applied_query;
                    snapshot.visible = visible;
                    snapshot.recompute_count = recompute_count;
                    snapshot.recompute_pending = false;
                });
            }
        }
    }

    fn apply_collection(&mut self, outcome: LoadOutcome) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.canonical = outcome.courses.clone();
        let visible = self.recompute();
        let total = self.canonical.len();
        let load_failed = outcome.is_failure();
        if let Some(err) = &outcome.failure {
            debug!(kind = ?err.kind, "course directory settles empty after failed load");
        }
        self.publish(move |snapshot| {
            snapshot.loading = false;
            snapshot.load_failed = load_failed;
            snapshot.total = total;
            snapshot.quarantined = outcome.quarantined;
            snapshot.visible = visible;
        });
    }

    fn recompute(&self) -> Arc<[Course]> {
        if self.canonical.is_empty() {
            return Arc::from(Vec::new());
        }
        if self.applied_query.is_empty() {
            return self.canonical.clone();
        }
        Arc::from(visible_subset(&self.applied_query, &self.canonical))
    }

    fn publish(&self, update: impl FnOnce(&mut ViewSnapshot)) {
        self.state_tx.send_modify(|snapshot| update(Arc::make_mut(snapshot)));
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
