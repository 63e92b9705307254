use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::types::IdentityKey;

/// Severity classification of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// Expected skip, only interesting when tracing a run (e.g. unresolved references).
    Debug,
    /// Non-fatal anomaly worth reporting (unsupported feature, duplicate key...).
    Warning,
}

/// Features recognized in the tables but deliberately not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnsupportedFeature {
    TriaxialEllipsoid,
    NonZeroPrimeMeridian,
    GeocentricBaseCrs,
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnsupportedFeature::TriaxialEllipsoid => "triaxial ellipsoid not yet supported",
            UnsupportedFeature::NonZeroPrimeMeridian => "non-zero prime meridian not yet supported",
            UnsupportedFeature::GeocentricBaseCrs => {
                "projection from a geocentric base CRS not yet supported"
            }
        })
    }
}

/// Why a row produced no entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    Unsupported(UnsupportedFeature),
    /// The referenced key is absent from the upstream table.
    UnresolvedReference(IdentityKey),
    /// The projection method is not in the catalog.
    UnrecognizedMethod(String),
}

/// What happened to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    Skipped(SkipReason),
    /// The row's key was already taken by an earlier row; the new entity was dropped.
    DuplicateKey(IdentityKey),
}

/// A recoverable event attached to one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Table (stage) name, e.g. `datum`.
    pub table: &'static str,
    /// 1-based line number in the table file.
    pub line: usize,
    /// Name column of the row.
    pub name: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match &self.kind {
            DiagnosticKind::Skipped(SkipReason::UnresolvedReference(_))
            | DiagnosticKind::Skipped(SkipReason::Unsupported(UnsupportedFeature::GeocentricBaseCrs)) => {
                Severity::Debug
            }
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line {} ('{}'): ", self.table, self.line, self.name)?;
        match &self.kind {
            DiagnosticKind::Skipped(SkipReason::Unsupported(feature)) => write!(f, "{feature}"),
            DiagnosticKind::Skipped(SkipReason::UnresolvedReference(key)) => {
                write!(f, "unresolved reference {key}")
            }
            DiagnosticKind::Skipped(SkipReason::UnrecognizedMethod(method)) => {
                write!(f, "no operation method named '{method}'")
            }
            DiagnosticKind::DuplicateKey(key) => write!(f, "duplicated entry {key}"),
        }
    }
}

/// Context about one table stage.
#[derive(Debug, Clone)]
pub struct StageContext {
    /// Table (stage) name.
    pub table: &'static str,
    /// Source file, when read from disk.
    pub path: Option<PathBuf>,
}

/// Row counts reported when a stage finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    /// Data rows read (header, comments and blank lines excluded).
    pub rows: usize,
    /// Entities stored in the table.
    pub created: usize,
    /// Rows that produced no entity.
    pub skipped: usize,
    /// Entities dropped because their key was already taken.
    pub duplicates: usize,
}

/// Observer interface for pipeline diagnostics.
///
/// Implementors can record metrics, logs, or collect events for later inspection.
pub trait PipelineObserver: Send + Sync {
    /// Called for every skipped row and duplicate key.
    fn on_diagnostic(&self, _diagnostic: &Diagnostic) {}

    /// Called when a stage has consumed its whole table.
    fn on_stage_finished(&self, _ctx: &StageContext, _stats: StageStats) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        for o in &self.observers {
            o.on_diagnostic(diagnostic);
        }
    }

    fn on_stage_finished(&self, ctx: &StageContext, stats: StageStats) {
        for o in &self.observers {
            o.on_stage_finished(ctx, stats);
        }
    }
}

/// Forwards events to `tracing`: warnings at `WARN`, expected skips at `DEBUG`, stage
/// summaries at `INFO`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => tracing::warn!(
                table = diagnostic.table,
                line = diagnostic.line,
                "{diagnostic}"
            ),
            Severity::Debug => tracing::debug!(
                table = diagnostic.table,
                line = diagnostic.line,
                "{diagnostic}"
            ),
        }
    }

    fn on_stage_finished(&self, ctx: &StageContext, stats: StageStats) {
        tracing::info!(
            table = ctx.table,
            path = ?ctx.path,
            rows = stats.rows,
            created = stats.created,
            skipped = stats.skipped,
            duplicates = stats.duplicates,
            "stage finished"
        );
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MemoryObserver {
    /// An observer with no recorded diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the diagnostics received so far, in arrival order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Diagnostics at or above `severity`.
    pub fn at_or_above(&self, severity: Severity) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.severity() >= severity)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PipelineObserver for MemoryObserver {
    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}
