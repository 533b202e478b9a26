//! Session state for one play-through: targets, score, countdown and phase.
//!
//! [`Session`] is the pure rule core and reports what changed as
//! [`SessionEvent`]s. [`SessionState`] wraps it as a Yew reducer for the UI.

use crate::config::{GameConfig, TargetPlacement};
use crate::state::viewport::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

pub type TargetId = usize;

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub x: f64,
    pub y: f64,
    /// Hit box in content pixels, centered on (x, y).
    pub bounds: Rect,
    pub found: bool,
}

impl Target {
    fn new(id: TargetId, placement: &TargetPlacement, sprite_width: f64, sprite_height: f64) -> Self {
        let w = sprite_width * placement.scale;
        let h = sprite_height * placement.scale;
        Self {
            id,
            x: placement.x,
            y: placement.y,
            bounds: Rect {
                x: placement.x - w * 0.5,
                y: placement.y - h * 0.5,
                width: w,
                height: h,
            },
            found: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    Paused,
    Ended { won: bool },
}

impl SessionPhase {
    pub fn is_ended(self) -> bool {
        matches!(self, SessionPhase::Ended { .. })
    }

    /// Whether the countdown clock should be running at all.
    pub fn is_ticking(self) -> bool {
        self == SessionPhase::Playing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    TargetFound(TargetId),
    ScoreChanged(u32),
    TimeChanged(u32),
    Paused,
    Resumed,
    Ended { won: bool },
}

/// Final result handed to persistence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub won: bool,
    pub score: u32,
    pub remaining_secs: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    targets: Vec<Target>,
    score: u32,
    remaining_secs: u32,
    phase: SessionPhase,
}

impl Session {
    pub fn new(cfg: &GameConfig) -> Self {
        let targets = cfg
            .targets
            .iter()
            .enumerate()
            .map(|(i, placement)| Target::new(i, placement, cfg.sprite_width, cfg.sprite_height))
            .collect();
        Self {
            targets,
            score: 0,
            remaining_secs: cfg.time_limit_secs,
            phase: SessionPhase::Playing,
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.phase {
            SessionPhase::Ended { won } => Some(SessionOutcome {
                won,
                score: self.score,
                remaining_secs: self.remaining_secs,
            }),
            _ => None,
        }
    }

    /// Last target in draw order whose hit box contains `p`.
    pub fn target_at(&self, p: Point) -> Option<TargetId> {
        self.targets.iter().rev().find(|t| t.bounds.contains(p)).map(|t| t.id)
    }

    pub fn activate_target(&mut self, id: TargetId) -> Vec<SessionEvent> {
        if self.phase != SessionPhase::Playing {
            return Vec::new();
        }
        let Some(target) = self.targets.get_mut(id) else {
            log::warn!("activation of unknown target {id}");
            return Vec::new();
        };
        if target.found {
            return Vec::new();
        }
        target.found = true;
        self.score += 1;
        let mut events = vec![SessionEvent::TargetFound(id), SessionEvent::ScoreChanged(self.score)];
        if self.score as usize == self.targets.len() {
            events.push(self.end(true));
        }
        events
    }

    /// One countdown interval elapsed.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        if self.phase != SessionPhase::Playing {
            return Vec::new();
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        let mut events = vec![SessionEvent::TimeChanged(self.remaining_secs)];
        if self.remaining_secs == 0 {
            events.push(self.end(false));
        }
        events
    }

    pub fn set_paused(&mut self, paused: bool) -> Vec<SessionEvent> {
        match (self.phase, paused) {
            (SessionPhase::Playing, true) => {
                self.phase = SessionPhase::Paused;
                vec![SessionEvent::Paused]
            }
            (SessionPhase::Paused, false) => {
                self.phase = SessionPhase::Playing;
                vec![SessionEvent::Resumed]
            }
            _ => Vec::new(),
        }
    }

    /// Portrait layouts cannot show the map properly, so play pauses until landscape.
    pub fn orientation_changed(&mut self, portrait: bool) -> Vec<SessionEvent> {
        self.set_paused(portrait)
    }

    fn end(&mut self, won: bool) -> SessionEvent {
        self.phase = SessionPhase::Ended { won };
        log::info!(
            "session ended won={won} score={} remaining={}s",
            self.score,
            self.remaining_secs
        );
        SessionEvent::Ended { won }
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum SessionAction {
    ActivateTarget(TargetId),
    TickSecond,
    OrientationChanged { portrait: bool },
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub config: Rc<GameConfig>,
    pub session: Session,
    /// Bumped on restart so views can reset per-run state.
    pub run_id: u32,
    /// Bumped on every change that produced events.
    pub version: u64,
}

impl SessionState {
    pub fn new(config: Rc<GameConfig>) -> Self {
        let session = Session::new(&config);
        Self {
            config,
            session,
            run_id: 0,
            version: 0,
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        let events = match action {
            ActivateTarget(id) => new.session.activate_target(id),
            TickSecond => new.session.tick(),
            OrientationChanged { portrait } => new.session.orientation_changed(portrait),
            Restart => {
                new.session = Session::new(&new.config);
                new.run_id = new.run_id.wrapping_add(1);
                new.version = new.version.wrapping_add(1);
                log::info!("session restarted run_id={}", new.run_id);
                return Rc::new(new);
            }
        };
        if events.is_empty() {
            return self;
        }
        log::debug!("session events {events:?}");
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}
