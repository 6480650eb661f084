use rayon::prelude::*;

use crate::foundation::core::Bitmap;
use crate::foundation::error::{ReelError, ReelResult};
use crate::screens::descriptor::FrameDescriptor;
use crate::widget::Widget;

/// Controls how a timeline's frames are painted on first use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PaintOpts {
    /// Paint frames on a dedicated rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Expand descriptors into one `(widget, animation step)` job per logical output frame.
///
/// A single descriptor contributes every animation step of its widget; several descriptors
/// contribute one still frame each.
pub(crate) fn paint_jobs(roots: &[FrameDescriptor]) -> ReelResult<Vec<(&dyn Widget, usize)>> {
    match roots {
        [] => Ok(Vec::new()),
        [only] => {
            let widget: &dyn Widget = only.widget.as_ref();
            let n = widget.frame_count();
            if n == 0 {
                return Err(ReelError::render("widget reported zero frames"));
            }
            Ok((0..n).map(|i| (widget, i)).collect())
        }
        many => Ok(many
            .iter()
            .map(|d| -> (&dyn Widget, usize) { (d.widget.as_ref(), 0) })
            .collect()),
    }
}

/// Paint every job, preserving job order in the output.
pub(crate) fn paint_all(
    jobs: &[(&dyn Widget, usize)],
    opts: &PaintOpts,
) -> ReelResult<Vec<Bitmap>> {
    if !opts.parallel || jobs.len() < 2 {
        return jobs.iter().map(|(w, i)| w.paint(*i)).collect();
    }
    let pool = build_thread_pool(opts.threads)?;
    pool.install(|| jobs.par_iter().map(|(w, i)| w.paint(*i)).collect())
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "paint 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/screens/paint.rs"]
mod tests;
