use indicatif::{ProgressBar, ProgressStyle};

const FETCH_TEMPLATE: &str = "{prefix:.bold} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg:.cyan}";

/// Progress over one acquisition batch; the message carries the ticker in flight.
pub fn fetch_pb(tickers: usize) -> ProgressBar {
    let pb = ProgressBar::new(tickers as u64).with_prefix("fetching");
    let style = ProgressStyle::with_template(FETCH_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#|-");
    pb.set_style(style);
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_pb_length() {
        let pb = fetch_pb(10);
        assert_eq!(pb.length(), Some(10));
        assert_eq!(pb.prefix(), "fetching");
    }
}
