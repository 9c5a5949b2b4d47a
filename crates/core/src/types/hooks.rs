//! # Lifecycle Hook Configuration
//!
//! Eleven independent switches, one per (phase, event) pair, that decide
//! which lifecycle transitions invoke ledger-side side effects. The record
//! always carries all eleven fields explicitly defaulted: it is built once
//! and replaced wholesale, never merged field-by-field, so flags set at
//! different times with different intents cannot split-brain.
//!
//! Hook execution itself belongs to the external ledger; this engine only
//! holds and transmits the configuration.

use serde::{Deserialize, Serialize};

/// Named transition points a hook can attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    StreamCreated,
    FundsCollected,
    StreamUpdated,
    StreamClosed,
    StreamPaused,
    StreamUnpaused,
}

/// Whether a hook runs before or after its transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPhase {
    Before,
    After,
}

/// Full hook switch record, 1:1 with a stream, settable only by the
/// recipient while the stream is non-terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    // A stream cannot have a hook fire before it exists, so created has
    // no before switch.
    pub call_after_stream_created: bool,
    pub call_before_funds_collected: bool,
    pub call_after_funds_collected: bool,
    pub call_before_stream_updated: bool,
    pub call_after_stream_updated: bool,
    pub call_before_stream_closed: bool,
    pub call_after_stream_closed: bool,
    pub call_before_stream_paused: bool,
    pub call_after_stream_paused: bool,
    pub call_before_stream_unpaused: bool,
    pub call_after_stream_unpaused: bool,
}

impl HookConfig {
    /// All eleven switches off
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether the switch for a given transition point is on
    pub fn fires(&self, event: HookEvent, phase: HookPhase) -> bool {
        use HookEvent::*;
        use HookPhase::*;
        match (event, phase) {
            (StreamCreated, Before) => false,
            (StreamCreated, After) => self.call_after_stream_created,
            (FundsCollected, Before) => self.call_before_funds_collected,
            (FundsCollected, After) => self.call_after_funds_collected,
            (StreamUpdated, Before) => self.call_before_stream_updated,
            (StreamUpdated, After) => self.call_after_stream_updated,
            (StreamClosed, Before) => self.call_before_stream_closed,
            (StreamClosed, After) => self.call_after_stream_closed,
            (StreamPaused, Before) => self.call_before_stream_paused,
            (StreamPaused, After) => self.call_after_stream_paused,
            (StreamUnpaused, Before) => self.call_before_stream_unpaused,
            (StreamUnpaused, After) => self.call_after_stream_unpaused,
        }
    }

    /// Every switch currently on, for display and audit
    pub fn enabled_hooks(&self) -> Vec<(HookEvent, HookPhase)> {
        use HookEvent::*;

        const EVENTS: [HookEvent; 6] = [
            StreamCreated,
            FundsCollected,
            StreamUpdated,
            StreamClosed,
            StreamPaused,
            StreamUnpaused,
        ];

        let mut enabled = Vec::new();
        for event in EVENTS {
            for phase in [HookPhase::Before, HookPhase::After] {
                if self.fires(event, phase) {
                    enabled.push((event, phase));
                }
            }
        }
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_all_off() {
        let config = HookConfig::disabled();
        assert!(config.enabled_hooks().is_empty());
    }

    #[test]
    fn test_created_has_no_before_phase() {
        let config = HookConfig {
            call_after_stream_created: true,
            ..Default::default()
        };
        assert!(!config.fires(HookEvent::StreamCreated, HookPhase::Before));
        assert!(config.fires(HookEvent::StreamCreated, HookPhase::After));
    }

    #[test]
    fn test_enabled_hooks_listing() {
        let config = HookConfig {
            call_before_funds_collected: true,
            call_after_funds_collected: true,
            call_after_stream_closed: true,
            ..Default::default()
        };
        let enabled = config.enabled_hooks();
        assert_eq!(
            enabled,
            vec![
                (HookEvent::FundsCollected, HookPhase::Before),
                (HookEvent::FundsCollected, HookPhase::After),
                (HookEvent::StreamClosed, HookPhase::After),
            ]
        );
    }
}
