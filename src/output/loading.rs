//! Loading state shown while a submission is in flight

use crate::analysis::AnalysisKind;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub trait LoadingIndicator {
    fn enter(&self, kind: AnalysisKind);
    fn exit(&self, kind: AnalysisKind);
}

/// Leaves the loading state when dropped, whichever way the call settled.
pub struct LoadingGuard<'a, L: LoadingIndicator + ?Sized> {
    indicator: &'a L,
    kind: AnalysisKind,
}

impl<'a, L: LoadingIndicator + ?Sized> LoadingGuard<'a, L> {
    pub fn enter(indicator: &'a L, kind: AnalysisKind) -> Self {
        indicator.enter(kind);
        Self { indicator, kind }
    }
}

impl<L: LoadingIndicator + ?Sized> Drop for LoadingGuard<'_, L> {
    fn drop(&mut self) {
        self.indicator.exit(self.kind);
    }
}

/// Terminal spinner, one per workflow.
#[derive(Default)]
pub struct SpinnerIndicator {
    active: Mutex<HashMap<AnalysisKind, ProgressBar>>,
}

impl SpinnerIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    fn message(kind: AnalysisKind) -> &'static str {
        match kind {
            AnalysisKind::Resume => "Analyzing resume...",
            AnalysisKind::AtsCheck => "Checking ATS compatibility...",
        }
    }
}

impl LoadingIndicator for SpinnerIndicator {
    fn enter(&self, kind: AnalysisKind) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(Self::message(kind));
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut active) = self.active.lock() {
            if let Some(previous) = active.insert(kind, spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn exit(&self, kind: AnalysisKind) {
        if let Ok(mut active) = self.active.lock() {
            if let Some(spinner) = active.remove(&kind) {
                spinner.finish_and_clear();
            }
        }
    }
}
