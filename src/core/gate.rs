//! Gesture-gated audio unlock.
//!
//! Browsers refuse to start audio without a preceding user gesture, so the
//! page waits for the first qualifying input and makes a single playback
//! attempt. The gate closes after that attempt whatever its outcome; it never
//! retries on its own. Later attempts only come from explicit requests: a
//! press on the hint or on the "start show" button.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockState {
    Pending,
    Unlocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintState {
    /// The page has no hint element.
    Absent,
    Visible,
    Dismissed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptSource {
    Gesture,
    AutoplayProbe,
    HintPress,
    StartButton,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayAttempt {
    pub seq: u32,
    pub source: AttemptSource,
}

/// What the caller has to do after a playback attempt settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settled {
    pub dismiss_hint: bool,
    pub detach_gesture_listeners: bool,
    pub started_playing: bool,
}

#[derive(Debug)]
pub struct PlaybackGate {
    state: UnlockState,
    hint: HintState,
    in_flight: u32,
    attempts: u32,
    playing: bool,
}

impl PlaybackGate {
    pub fn new(has_hint: bool) -> Self {
        Self {
            state: UnlockState::Pending,
            hint: if has_hint {
                HintState::Visible
            } else {
                HintState::Absent
            },
            in_flight: 0,
            attempts: 0,
            playing: false,
        }
    }

    pub fn state(&self) -> UnlockState {
        self.state
    }

    pub fn hint(&self) -> HintState {
        self.hint
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Total attempts handed out so far, from any source.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// First qualifying input closes the gate and yields the one attempt.
    pub fn on_gesture(&mut self) -> Option<PlayAttempt> {
        if self.state != UnlockState::Pending {
            return None;
        }
        self.state = UnlockState::Unlocked;
        Some(self.issue(AttemptSource::Gesture))
    }

    /// Timed attempt right after mount. Leaves the gate pending so the first
    /// gesture still gets its attempt if this one is refused.
    pub fn on_autoplay_probe(&mut self) -> Option<PlayAttempt> {
        if self.state != UnlockState::Pending || self.in_flight > 0 {
            return None;
        }
        Some(self.issue(AttemptSource::AutoplayProbe))
    }

    /// Explicit press on a hint that is still showing after a refused attempt.
    pub fn on_hint_pressed(&mut self) -> Option<PlayAttempt> {
        let eligible = self.state == UnlockState::Unlocked
            && self.hint == HintState::Visible
            && !self.playing
            && self.in_flight == 0;
        eligible.then(|| self.issue(AttemptSource::HintPress))
    }

    /// Explicit "start show" press. It is itself a gesture, so it also closes
    /// a pending gate, and it retries after a refusal while nothing plays.
    pub fn on_explicit_request(&mut self) -> Option<PlayAttempt> {
        if self.playing || self.in_flight > 0 {
            return None;
        }
        self.state = UnlockState::Unlocked;
        Some(self.issue(AttemptSource::StartButton))
    }

    pub fn on_playback_result(&mut self, attempt: PlayAttempt, ok: bool) -> Settled {
        self.in_flight = self.in_flight.saturating_sub(1);
        let mut settled = Settled::default();
        if !ok {
            log::debug!("[gate] attempt {} ({:?}) refused", attempt.seq, attempt.source);
            return settled;
        }
        if self.state == UnlockState::Pending {
            self.state = UnlockState::Unlocked;
            settled.detach_gesture_listeners = true;
        }
        if !self.playing {
            self.playing = true;
            settled.started_playing = true;
        }
        if self.hint == HintState::Visible {
            self.hint = HintState::Dismissed;
            settled.dismiss_hint = true;
        }
        settled
    }

    fn issue(&mut self, source: AttemptSource) -> PlayAttempt {
        self.attempts += 1;
        self.in_flight += 1;
        PlayAttempt {
            seq: self.attempts,
            source,
        }
    }
}
