use crate::cache::{AcquireKey, AcquisitionCache};
use crate::yahoo::PriceSource;
use indicatif::ProgressBar;
use tickboard_core::{build_view, DashboardView, Selection};
use tracing::{debug, info};

pub const SELECTION_PROMPT: &str = "Please select at least one ticker to start the analysis.";

/// Result of one pass through the dashboard flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Cycle {
    /// Nothing selected; the cycle stopped before acquiring data.
    AwaitingSelection,
    Ready(DashboardView),
}

/// Validate selection -> acquire (memoized) -> transform.
pub async fn run_cycle<S: PriceSource>(
    source: &S,
    cache: &mut AcquisitionCache,
    key: &AcquireKey,
    selection: &Selection,
    pb: &ProgressBar,
) -> Cycle {
    if selection.is_empty() {
        info!("{SELECTION_PROMPT}");
        return Cycle::AwaitingSelection;
    }
    debug!("running cycle for {selection:?}");

    let acquired = cache.load(source, key, pb).await;
    pb.finish_and_clear();

    Cycle::Ready(build_view(&acquired, selection))
}
