//! Unicode glyphs used in headings.

pub const CHECK: &str = "\u{2713}";
pub const CROSS: &str = "\u{2717}";
pub const CURVE_UP: &str = "\u{25B2}";
pub const CLOCK: &str = "\u{231A}";
pub const MONEY: &str = "\u{0024}";
pub const BAR_CHART: &str = "\u{25A0}";
pub const SETTINGS: &str = "\u{2699}";
