//! Text output formatting with progress bars and colors.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use ratewire_core::{ResetWindow, ResponseMeta};

use crate::commands::parse::ParseOutcome;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    /// Set the progress bar width.
    #[allow(dead_code)]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    // ========================================================================
    // Parse command
    // ========================================================================

    /// Formats one parse result: `6m45s99ms = 6m 45s 99ms (405099 ms)`.
    pub fn format_parse_outcome(&self, outcome: &ParseOutcome) -> String {
        let input = if outcome.input.is_empty() {
            self.dim("(empty)")
        } else {
            self.bold(&outcome.input)
        };

        match &outcome.result {
            Ok(parsed) => format!(
                "{} = {} {}",
                input,
                self.format_duration(parsed.duration),
                self.dim(&format!("({} ms)", parsed.duration.as_millis()))
            ),
            Err(e) => format!("{}: {} - {}", input, self.red("Error"), e),
        }
    }

    /// Formats a duration as `1h 2m 3s 4ms`, omitting zero units.
    pub fn format_duration(&self, duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let parts = [
            (total_secs / 3600, "h"),
            ((total_secs % 3600) / 60, "m"),
            (total_secs % 60, "s"),
            (u64::from(duration.subsec_millis()), "ms"),
        ];

        let text: Vec<String> = parts
            .iter()
            .filter(|(value, _)| *value > 0)
            .map(|(value, unit)| format!("{value}{unit}"))
            .collect();

        if text.is_empty() {
            "0s".to_string()
        } else {
            text.join(" ")
        }
    }

    // ========================================================================
    // Headers command
    // ========================================================================

    /// Formats response metadata, resolving reset windows against `now`.
    pub fn format_meta(&self, meta: &ResponseMeta, now: DateTime<Utc>) -> String {
        let mut lines = Vec::new();

        if let Some(id) = &meta.request_id {
            lines.push(format!("{:<13} {}", "Request:", self.bold(id)));
        }
        if let Some(org) = &meta.organization {
            lines.push(format!("{:<13} {}", "Organization:", org));
        }
        if let Some(version) = &meta.api_version {
            lines.push(format!("{:<13} {}", "Version:", version));
        }
        if let Some(ms) = meta.processing_ms {
            lines.push(format!("{:<13} {} ms", "Processing:", ms));
        }

        let limits = &meta.rate_limit;
        if !limits.has_data() {
            lines.push(self.dim("No rate-limit headers found"));
            return lines.join("\n");
        }

        lines.push(self.format_quota(
            "Requests",
            limits.limit_requests,
            limits.remaining_requests,
            limits.reset_requests.as_ref(),
            now,
        ));
        lines.push(self.format_quota(
            "Tokens",
            limits.limit_tokens,
            limits.remaining_tokens,
            limits.reset_tokens.as_ref(),
            now,
        ));

        if limits.is_limited() {
            let wait = limits
                .next_reset()
                .map(|w| format!(", retry in {}", self.format_duration(w.duration)))
                .unwrap_or_default();
            lines.push(format!("{}{}", self.red("Rate limited"), wait));
        }

        lines.join("\n")
    }

    /// Formats one quota line with progress bar and reset countdown.
    fn format_quota(
        &self,
        label: &str,
        limit: Option<u64>,
        remaining: Option<u64>,
        reset: Option<&ResetWindow>,
        now: DateTime<Utc>,
    ) -> String {
        let mut result = match (limit, remaining) {
            (Some(limit), Some(remaining)) if limit > 0 => {
                #[allow(clippy::cast_precision_loss)]
                let percent_remaining = (remaining as f64 / limit as f64 * 100.0).clamp(0.0, 100.0);
                let bar = self.progress_bar(percent_remaining);
                let count = self.color_for_percent(
                    percent_remaining,
                    &format!("{remaining}/{limit} left"),
                );
                format!("{:<9} {} {}", format!("{label}:"), bar, count)
            }
            (_, Some(remaining)) => format!("{:<9} {} left", format!("{label}:"), remaining),
            (Some(limit), None) => format!("{:<9} limit {}", format!("{label}:"), limit),
            (None, None) => format!("{:<9} {}", format!("{label}:"), self.dim("unknown")),
        };

        if let Some(window) = reset {
            result.push_str(&format!("\n          Resets {}", self.dim(&self.format_reset(window, now))));
        }

        result
    }

    /// Formats a reset window as countdown plus local wall-clock time.
    fn format_reset(&self, window: &ResetWindow, now: DateTime<Utc>) -> String {
        if window.duration.is_zero() {
            return "now".to_string();
        }

        let countdown = format!("in {}", self.format_duration(window.duration));
        match window.resets_at(now) {
            Some(at) => format!(
                "{} (at {})",
                countdown,
                at.with_timezone(&Local).format("%H:%M:%S")
            ),
            None => countdown,
        }
    }

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let filled = ((percent_remaining / 100.0) * self.bar_width as f64).round() as usize;
        let filled = filled.min(self.bar_width);
        let empty = self.bar_width - filled;

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent_remaining, &bar)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

// ============================================================================
// Tests
// ============================================================================
