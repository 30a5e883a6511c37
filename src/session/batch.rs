use rayon::prelude::*;

use crate::{
    foundation::error::SharecardResult,
    layout::{builder::build_layout, style::StyleTable},
    render::engine::{CompositionEngine, RenderOutcome},
    session::{
        avatar::{AvatarResolver, resolve_speakers},
        model::{SessionMap, SessionRecord},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How sessions are scheduled.
pub struct RenderThreading {
    /// Render sessions on the rayon pool, one per worker.
    pub parallel: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What happened to one session.
pub enum SessionStatus {
    /// The image was written.
    Rendered(RenderOutcome),
    /// The image was not written.
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Outcome of one session within a run.
pub struct SessionOutcome {
    /// Session the outcome belongs to.
    pub session_id: String,
    /// Result.
    pub status: SessionStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Per-session results of [`generate_images`], in session order.
pub struct RunSummary {
    /// One entry per input session.
    pub outcomes: Vec<SessionOutcome>,
}

impl RunSummary {
    /// Sessions whose image was written.
    pub fn succeeded(&self) -> impl Iterator<Item = &SessionOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SessionStatus::Rendered(_)))
    }

    /// Sessions whose image was not written.
    pub fn failed(&self) -> impl Iterator<Item = &SessionOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SessionStatus::Failed(_)))
    }

    /// True when every session rendered.
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }
}

/// Resolve avatars, build a layout and render one image per session.
///
/// Avatars are resolved for every session before the first render. A failing session is
/// recorded and the run continues; only an unusable template ends the run early.
pub fn generate_images(
    engine: &CompositionEngine,
    sessions: &mut SessionMap,
    resolver: &dyn AvatarResolver,
    styles: &StyleTable,
    threading: RenderThreading,
) -> SharecardResult<RunSummary> {
    for session in sessions.values_mut() {
        resolve_speakers(session, resolver);
    }

    let render = |session: &SessionRecord| {
        let layout = build_layout(session, styles);
        (session.session_id.clone(), engine.create_image(&layout))
    };

    let results: Vec<(String, SharecardResult<RenderOutcome>)> = if threading.parallel {
        sessions.par_iter().map(|(_, s)| render(s)).collect()
    } else {
        let mut out = Vec::with_capacity(sessions.len());
        for session in sessions.values() {
            match render(session) {
                (_, Err(e)) if e.is_fatal_to_run() => return Err(e),
                done => out.push(done),
            }
        }
        out
    };

    let mut summary = RunSummary::default();
    for (session_id, result) in results {
        let status = match result {
            Ok(outcome) => SessionStatus::Rendered(outcome),
            Err(e) if e.is_fatal_to_run() => return Err(e),
            Err(e) => {
                tracing::warn!(session = %session_id, error = %e, "session failed");
                SessionStatus::Failed(e.to_string())
            }
        };
        summary.outcomes.push(SessionOutcome { session_id, status });
    }

    tracing::info!(
        rendered = summary.succeeded().count(),
        failed = summary.failed().count(),
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "../../tests/unit/session/batch.rs"]
mod tests;
