//! The render worker: one dedicated OS thread that owns the raster surface.
//!
//! The surface (font database, resvg options) is stateful and not shared, so every
//! layout and rasterization job is marshalled onto this thread. Callers hold a cheap,
//! cloneable [`RenderHandle`] and await a oneshot reply. Jobs run strictly one at a
//! time, in submission order.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use tokio::sync::{mpsc, oneshot};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::config::ExportConfig;
use crate::errors::ExportError;
use crate::layout::MeasuredDocument;
use crate::models::{ResumeRecord, StyleProfile};
use crate::render::{RasterSurface, SvgSurface};

use super::pipeline::{
    export_pdf, measure_document, render_preview_png, ExportOutcome, PreviewOutcome,
};

// ────────────────────────────────────────────────────────────────────────────
// Cancellation
// ────────────────────────────────────────────────────────────────────────────

/// Shared cancellation flag. Clones observe the same flag.
///
/// A flag may be linked to a parent; it then also reads as cancelled once the
/// parent is.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl CancelFlag {
    pub fn new() -> Self {
        CancelFlag::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.load(Ordering::Acquire))
    }

    /// This flag, additionally cancelled by `parent`.
    fn linked_to(&self, parent: &CancelFlag) -> CancelFlag {
        CancelFlag {
            flag: Arc::clone(&self.flag),
            parent: Some(Arc::clone(&parent.flag)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

type Reply<T> = oneshot::Sender<Result<T, ExportError>>;

enum Job {
    Pdf {
        id: Uuid,
        record: ResumeRecord,
        style: StyleProfile,
        path: PathBuf,
        cancel: CancelFlag,
        reply: Reply<ExportOutcome>,
    },
    Preview {
        id: Uuid,
        record: ResumeRecord,
        style: StyleProfile,
        path: PathBuf,
        cancel: CancelFlag,
        reply: Reply<PreviewOutcome>,
    },
    Measure {
        id: Uuid,
        record: ResumeRecord,
        style: StyleProfile,
        reply: Reply<MeasuredDocument>,
    },
    Shutdown,
}

// ────────────────────────────────────────────────────────────────────────────
// Thread and handle
// ────────────────────────────────────────────────────────────────────────────

/// Owns the worker thread. Dropping it cancels in-flight work and joins the thread.
///
/// The join in `Drop` blocks the calling thread until the current job returns, and a
/// resvg render cannot be interrupted. Inside an async runtime prefer
/// [`RenderThread::shutdown`], which joins on the blocking pool.
pub struct RenderThread {
    handle: RenderHandle,
    shutdown: CancelFlag,
    join: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Starts the worker with a system-font [`SvgSurface`].
    pub fn spawn(config: ExportConfig) -> std::io::Result<Self> {
        Self::spawn_with(config, SvgSurface::new)
    }

    /// Starts the worker with a custom surface. `make_surface` runs on the worker thread.
    pub fn spawn_with<S, F>(config: ExportConfig, make_surface: F) -> std::io::Result<Self>
    where
        S: RasterSurface + 'static,
        F: FnOnce() -> S + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = CancelFlag::new();
        let worker_shutdown = shutdown.clone();

        let join = std::thread::Builder::new()
            .name("resume-render".to_string())
            .spawn(move || run_worker(rx, make_surface(), config, worker_shutdown))?;

        info!("Render thread started");
        Ok(RenderThread {
            handle: RenderHandle { tx },
            shutdown,
            join: Some(join),
        })
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle.clone()
    }

    /// Cancels in-flight work and waits for the worker without blocking the runtime.
    pub async fn shutdown(mut self) {
        self.signal_stop();
        if let Some(join) = self.join.take() {
            match tokio::task::spawn_blocking(move || join.join()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => warn!("Render thread panicked"),
                Err(e) => warn!(error = %e, "Render thread join task failed"),
            }
        }
    }

    fn signal_stop(&self) {
        self.shutdown.cancel();
        let _ = self.handle.tx.send(Job::Shutdown);
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            self.signal_stop();
            if join.join().is_err() {
                warn!("Render thread panicked");
            }
        }
    }
}

/// Cloneable front door to the render thread.
#[derive(Clone)]
pub struct RenderHandle {
    tx: mpsc::UnboundedSender<Job>,
}

impl RenderHandle {
    pub async fn export_pdf(
        &self,
        record: ResumeRecord,
        style: StyleProfile,
        path: PathBuf,
        cancel: CancelFlag,
    ) -> Result<ExportOutcome, ExportError> {
        let (reply, rx) = oneshot::channel();
        self.submit(
            Job::Pdf {
                id: Uuid::new_v4(),
                record,
                style,
                path,
                cancel,
                reply,
            },
            rx,
        )
        .await
    }

    pub async fn render_preview(
        &self,
        record: ResumeRecord,
        style: StyleProfile,
        path: PathBuf,
        cancel: CancelFlag,
    ) -> Result<PreviewOutcome, ExportError> {
        let (reply, rx) = oneshot::channel();
        self.submit(
            Job::Preview {
                id: Uuid::new_v4(),
                record,
                style,
                path,
                cancel,
                reply,
            },
            rx,
        )
        .await
    }

    pub async fn measure(
        &self,
        record: ResumeRecord,
        style: StyleProfile,
    ) -> Result<MeasuredDocument, ExportError> {
        let (reply, rx) = oneshot::channel();
        self.submit(
            Job::Measure {
                id: Uuid::new_v4(),
                record,
                style,
                reply,
            },
            rx,
        )
        .await
    }

    async fn submit<T>(
        &self,
        job: Job,
        rx: oneshot::Receiver<Result<T, ExportError>>,
    ) -> Result<T, ExportError> {
        if self.tx.send(job).is_err() {
            warn!("Render thread is gone, job not submitted");
            return Err(ExportError::Cancelled);
        }
        // A dropped reply means the worker shut down before running the job.
        rx.await.unwrap_or(Err(ExportError::Cancelled))
    }
}

fn run_worker<S: RasterSurface>(
    mut rx: mpsc::UnboundedReceiver<Job>,
    mut surface: S,
    config: ExportConfig,
    shutdown: CancelFlag,
) {
    let settings = config.layout_settings();

    while let Some(job) = rx.blocking_recv() {
        match job {
            Job::Pdf {
                id,
                record,
                style,
                path,
                cancel,
                reply,
            } => {
                let _span = info_span!("render_job", job_id = %id, kind = "pdf").entered();
                let cancel = cancel.linked_to(&shutdown);
                let result = export_pdf(&mut surface, &record, &style, &path, &config, &cancel);
                log_failure(&result);
                let _ = reply.send(result);
            }
            Job::Preview {
                id,
                record,
                style,
                path,
                cancel,
                reply,
            } => {
                let _span = info_span!("render_job", job_id = %id, kind = "preview").entered();
                let cancel = cancel.linked_to(&shutdown);
                let result =
                    render_preview_png(&mut surface, &record, &style, &path, &config, &cancel);
                log_failure(&result);
                let _ = reply.send(result);
            }
            Job::Measure {
                id,
                record,
                style,
                reply,
            } => {
                let _span = info_span!("render_job", job_id = %id, kind = "measure").entered();
                let result = if shutdown.is_cancelled() {
                    Err(ExportError::Cancelled)
                } else {
                    measure_document(&record, &style, &settings)
                };
                log_failure(&result);
                let _ = reply.send(result);
            }
            Job::Shutdown => break,
        }
    }

    info!("Render thread stopped");
}

fn log_failure<T>(result: &Result<T, ExportError>) {
    if let Err(e) = result {
        warn!(error = %e, "Render job failed");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SvgScene;
    use resvg::tiny_skia::Pixmap;

    struct DeadSurface;

    impl RasterSurface for DeadSurface {
        fn rasterize(&mut self, _scene: &SvgScene) -> Option<Pixmap> {
            None
        }
    }

    fn record() -> ResumeRecord {
        ResumeRecord {
            name: Some("Margaret Hamilton".to_string()),
            job_title: Some("Director of Software Engineering".to_string()),
            company: Some("MIT Instrumentation Laboratory".to_string()),
            skills: Some("Flight software, Error detection".to_string()),
            ..Default::default()
        }
    }

    fn spawn_test_thread() -> RenderThread {
        RenderThread::spawn_with(ExportConfig::default(), SvgSurface::without_fonts).unwrap()
    }

    #[tokio::test]
    async fn test_async_shutdown_stops_worker() {
        let thread = spawn_test_thread();
        let handle = thread.handle();
        thread.shutdown().await;
        let result = handle.measure(record(), StyleProfile::default()).await;
        assert!(matches!(result, Err(ExportError::Cancelled)));
    }

    #[test]
    fn test_cancel_flag_is_shared_and_linked() {
        let parent = CancelFlag::new();
        let own = CancelFlag::new();
        let linked = own.linked_to(&parent);
        assert!(!linked.is_cancelled());
        parent.cancel();
        assert!(linked.is_cancelled());
        assert!(!own.is_cancelled());

        let clone = own.clone();
        clone.cancel();
        assert!(own.is_cancelled());
    }

    #[tokio::test]
    async fn test_worker_exports_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hamilton.pdf");
        let thread = spawn_test_thread();

        let outcome = thread
            .handle()
            .export_pdf(record(), StyleProfile::default(), path.clone(), CancelFlag::new())
            .await
            .unwrap();

        assert_eq!(outcome.path, path);
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_worker_measures() {
        let thread = spawn_test_thread();
        let measured = thread
            .handle()
            .measure(record(), StyleProfile::default())
            .await
            .unwrap();
        assert_eq!(measured.width, 650.0);
        assert_eq!(measured.sections.len(), 2);
    }

    #[tokio::test]
    async fn test_worker_reports_unavailable_surface() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.pdf");
        let thread = RenderThread::spawn_with(ExportConfig::default(), || DeadSurface).unwrap();
        let result = thread
            .handle()
            .export_pdf(record(), StyleProfile::default(), path.clone(), CancelFlag::new())
            .await;
        assert!(matches!(result, Err(ExportError::RenderUnavailable { .. })));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cancelled_job_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cancelled.pdf");
        let thread = spawn_test_thread();
        let cancel = CancelFlag::new();
        cancel.cancel();
        let result = thread
            .handle()
            .export_pdf(record(), StyleProfile::default(), path.clone(), cancel)
            .await;
        assert!(matches!(result, Err(ExportError::Cancelled)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_handle_after_drop_is_cancelled() {
        let thread = spawn_test_thread();
        let handle = thread.handle();
        drop(thread);
        let result = handle.measure(record(), StyleProfile::default()).await;
        assert!(matches!(result, Err(ExportError::Cancelled)));
    }

    #[tokio::test]
    async fn test_jobs_from_cloned_handles_all_complete() {
        let dir = tempfile::tempdir().unwrap();
        let thread = spawn_test_thread();
        let first = thread.handle();
        let second = thread.handle();

        let (a, b) = tokio::join!(
            first.render_preview(
                record(),
                StyleProfile::default(),
                dir.path().join("a.png"),
                CancelFlag::new()
            ),
            second.export_pdf(
                ResumeRecord::default(),
                StyleProfile::default(),
                dir.path().join("b.pdf"),
                CancelFlag::new()
            ),
        );
        assert_eq!(a.unwrap().width, 650);
        assert!(b.unwrap().bytes_written > 0);
    }
}
