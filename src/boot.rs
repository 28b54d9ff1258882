//! Scripted boot sequence for the terminal panel.
//!
//! A fixed list of lines is revealed one by one at configured offsets from the
//! moment the player starts, building up a console-style startup log.
//!
//! ```text
//! t=0      > Initializing Jarvis Core v3.2.1 ...
//! t=600    > Loading neural mesh network ...
//! t=1200   > Establishing secure uplink ... OK
//! ...
//! t=4800   > Ready. Awaiting command, sir.
//! ```
//!
//! # Scheduling
//!
//! [`BootSequencePlayer::start`] sorts the lines once (stable, so equal offsets
//! keep their input order) and schedules one one-shot timer per line.
//! [`BootSequencePlayer::poll`] releases every due line into the
//! [`RevealedLog`]. [`BootSequencePlayer::stop`] releases the lines already due
//! at its clock reading and cancels the rest; a cancelled line is never
//! emitted, even if the clock keeps advancing.
//!
//! # Classification
//!
//! [`classify`] derives a display emphasis from the line text. It has no effect
//! on scheduling.

use tracing::{debug, info};

use crate::config::BOOT_SEQUENCE;
use crate::timer::{OneShotQueue, normalize_delay_ms};

// =============================================================================
// Boot Lines
// =============================================================================

/// One scripted line and its reveal offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootLine {
    pub text: String,
    /// Offset from player start. Negative values are treated as 0.
    pub reveal_at_ms: i64,
}

impl BootLine {
    pub fn new(
        text: impl Into<String>,
        reveal_at_ms: i64,
    ) -> Self {
        Self {
            text: text.into(),
            reveal_at_ms,
        }
    }
}

/// The reference nine-line sequence from [`BOOT_SEQUENCE`].
pub fn reference_sequence() -> Vec<BootLine> {
    BOOT_SEQUENCE
        .iter()
        .map(|&(text, at)| BootLine::new(text, at))
        .collect()
}

// =============================================================================
// Revealed Log
// =============================================================================

/// A revealed line and when it appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedLine {
    pub text: String,
    /// Clock reading of the poll that revealed it.
    pub revealed_at_ms: u64,
    pub class: LineClass,
}

/// Append-only log of revealed lines.
///
/// Entries are never reordered or removed; the log is only cleared as a whole
/// by restarting the player.
#[derive(Debug, Clone, Default)]
pub struct RevealedLog {
    lines: Vec<RevealedLine>,
}

impl RevealedLog {
    pub const fn new() -> Self { Self { lines: Vec::new() } }

    fn append(
        &mut self,
        line: RevealedLine,
    ) {
        self.lines.push(line);
    }

    fn clear(&mut self) { self.lines.clear(); }

    #[inline]
    pub fn len(&self) -> usize { self.lines.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Revealed lines, oldest first.
    pub fn lines(&self) -> &[RevealedLine] { &self.lines }

    /// Revealed texts, oldest first.
    pub fn texts(&self) -> impl Iterator<Item = &str> { self.lines.iter().map(|l| l.text.as_str()) }
}

// =============================================================================
// Player
// =============================================================================

/// Player lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Never started.
    Idle,
    /// Lines pending.
    Playing,
    /// Every line revealed.
    Finished,
    /// Stopped before finishing; pending lines were cancelled.
    Cancelled,
}

/// Reveals a boot sequence over time.
pub struct BootSequencePlayer {
    script: Vec<BootLine>,
    pending: OneShotQueue<usize>,
    log: RevealedLog,
    state: PlayerState,
    started_at_ms: u64,
}

impl BootSequencePlayer {
    /// Create an idle player for `lines`.
    pub fn new(mut lines: Vec<BootLine>) -> Self {
        // Stable: lines sharing an offset keep their input order
        lines.sort_by_key(|line| normalize_delay_ms(line.reveal_at_ms));
        Self {
            script: lines,
            pending: OneShotQueue::new(),
            log: RevealedLog::new(),
            state: PlayerState::Idle,
            started_at_ms: 0,
        }
    }

    /// Player for [`reference_sequence`].
    pub fn reference() -> Self { Self::new(reference_sequence()) }

    /// Start (or restart) playback at `now_ms`.
    ///
    /// Clears the log and schedules every line. Lines with a zero offset are
    /// revealed by the next [`poll`](Self::poll), not by `start` itself.
    pub fn start(
        &mut self,
        now_ms: u64,
    ) {
        self.pending.cancel_all();
        self.log.clear();
        self.started_at_ms = now_ms;
        for (idx, line) in self.script.iter().enumerate() {
            let due = now_ms.saturating_add(normalize_delay_ms(line.reveal_at_ms));
            self.pending.schedule(due, idx);
        }
        self.state = if self.script.is_empty() {
            PlayerState::Finished
        } else {
            PlayerState::Playing
        };
        info!(lines = self.script.len(), "boot sequence started");
    }

    /// Reveal every line due at or before `now_ms`.
    ///
    /// Returns how many lines this call revealed.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> usize {
        if self.state != PlayerState::Playing {
            return 0;
        }

        let mut revealed = 0;
        for (_, idx) in self.pending.drain_due(now_ms) {
            let text = &self.script[idx].text;
            debug!(line = idx, elapsed_ms = now_ms - self.started_at_ms, "boot line revealed");
            self.log.append(RevealedLine {
                text: text.clone(),
                revealed_at_ms: now_ms,
                class: classify(text),
            });
            revealed += 1;
        }

        if self.pending.is_empty() {
            self.state = PlayerState::Finished;
        }
        revealed
    }

    /// Stop playback at `now_ms`.
    ///
    /// Lines already due at `now_ms` are revealed first, exactly as
    /// [`poll`](Self::poll) would; the rest are cancelled. Returns `true` only
    /// for the call that actually cancelled pending lines.
    pub fn stop(
        &mut self,
        now_ms: u64,
    ) -> bool {
        self.poll(now_ms);
        self.cancel()
    }

    /// Drop every pending line without revealing it.
    fn cancel(&mut self) -> bool {
        if self.state != PlayerState::Playing {
            return false;
        }
        let cancelled = self.pending.cancel_all();
        self.state = PlayerState::Cancelled;
        info!(cancelled, revealed = self.log.len(), "boot sequence stopped");
        true
    }

    #[inline]
    pub const fn state(&self) -> PlayerState { self.state }

    #[inline]
    pub const fn log(&self) -> &RevealedLog { &self.log }

    /// Lines still waiting to be revealed.
    #[inline]
    pub fn pending(&self) -> usize { self.pending.len() }

    /// Number of lines in the script.
    #[inline]
    pub fn script_len(&self) -> usize { self.script.len() }

    /// Clock reading passed to the last [`start`](Self::start).
    #[inline]
    pub const fn started_at_ms(&self) -> u64 { self.started_at_ms }
}

impl Drop for BootSequencePlayer {
    // No clock reading here: pending lines are discarded
    fn drop(&mut self) { self.cancel(); }
}

// =============================================================================
// Line Classification
// =============================================================================

/// Display emphasis of a terminal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Final "Ready" line.
    Success,
    /// Status lines reporting OK / ONLINE / GREEN.
    Highlight,
    Neutral,
}

/// Classify a line by substring match on its text.
///
/// `"Ready"` wins over the highlight tokens.
pub fn classify(text: &str) -> LineClass {
    if text.contains("Ready") {
        LineClass::Success
    } else if ["OK", "ONLINE", "GREEN"].iter().any(|token| text.contains(token)) {
        LineClass::Highlight
    } else {
        LineClass::Neutral
    }
}
