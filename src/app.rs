//! Application shell: screens, dialogs and the save-on-finish hook.
//!
//! The shell owns the engine and turns screen-agnostic [`Intent`]s into
//! [`ScoreEvent`]s according to what is on screen. It never mutates match
//! state directly. Raw key events go through [`App::handle_key`], which
//! owns long-press detection for the side keys.

use std::sync::Arc;
use std::thread::JoinHandle;

use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::config::AppConfig;
use crate::core::{MatchSnapshot, MatchState, Mode};
use crate::input::{handle_key_event, tap_side, PressTracker};
use crate::record::{spawn_sync, CompanionLink, DirectoryLink, MatchStore, MatchSummary, SavedMatch};
use crate::term::{Dialog, Screen};
use crate::types::{GameVariant, Intent, ScoreEvent, Side};

/// What the event loop should do after an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

struct Session {
    state: MatchState,
    started: NaiveDateTime,
    saved: bool,
}

pub struct App {
    store: MatchStore,
    link: Option<Arc<dyn CompanionLink>>,
    sync_delete: bool,
    clock: Clock,
    session: Option<Session>,
    dialog: Dialog,
    status: Option<String>,
    snapshot: MatchSnapshot,
    last_saved: Option<SavedMatch>,
    sync_handle: Option<JoinHandle<bool>>,
    presses: PressTracker,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let link = config
            .sync_dir
            .as_ref()
            .map(|dir| Arc::new(DirectoryLink::new(dir)) as Arc<dyn CompanionLink>);
        Self {
            store: MatchStore::new(&config.match_dir),
            link,
            sync_delete: config.sync_delete,
            clock: local_now,
            session: None,
            dialog: Dialog::None,
            status: None,
            snapshot: MatchSnapshot::default(),
            last_saved: None,
            sync_handle: None,
            presses: PressTracker::with_config(
                config.long_press_ms,
                config.long_press_ms.saturating_mul(2),
            ),
        }
    }

    /// Replace the wall clock used for match timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom companion transport instead of the configured one.
    pub fn with_link(mut self, link: Arc<dyn CompanionLink>) -> Self {
        self.link = Some(link);
        self
    }

    pub fn state(&self) -> Option<&MatchState> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Summary written when the last match ended.
    pub fn last_saved(&self) -> Option<&SavedMatch> {
        self.last_saved.as_ref()
    }

    /// Worker of the most recent companion sync, if one was started.
    pub fn take_sync_handle(&mut self) -> Option<JoinHandle<bool>> {
        self.sync_handle.take()
    }

    /// True when side keys should go through long-press detection. Dialogs
    /// and the variant screen take plain taps.
    pub fn tracks_presses(&self) -> bool {
        self.session.is_some() && self.dialog == Dialog::None && self.mode() != Mode::GameOver
    }

    /// Frame description for the view.
    pub fn screen(&self) -> Screen<'_> {
        Screen {
            snapshot: self.session.as_ref().map(|_| &self.snapshot),
            dialog: self.dialog,
            status: self.status.as_deref(),
        }
    }

    /// Route a raw key event. Side keys go through the press tracker while
    /// a match screen is up; any other key first resolves pending taps so
    /// they apply to the end they were pressed in.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppControl {
        let intent = match (tap_side(key), key.kind) {
            (Some(side), KeyEventKind::Press | KeyEventKind::Repeat) if self.tracks_presses() => {
                self.presses.handle_key_press(side)
            }
            (Some(side), KeyEventKind::Release) => self.presses.handle_key_release(side),
            (_, KeyEventKind::Press) => {
                if self.flush_presses() == AppControl::Quit {
                    return AppControl::Quit;
                }
                handle_key_event(key)
            }
            _ => None,
        };
        match intent {
            Some(intent) => self.dispatch(intent),
            None => AppControl::Continue,
        }
    }

    /// Advance press timers by `elapsed_ms` and apply keys that resolved.
    pub fn tick(&mut self, elapsed_ms: u32) -> AppControl {
        for intent in self.presses.update(elapsed_ms) {
            if self.dispatch(intent) == AppControl::Quit {
                return AppControl::Quit;
            }
        }
        AppControl::Continue
    }

    fn flush_presses(&mut self) -> AppControl {
        for intent in self.presses.flush() {
            if self.dispatch(intent) == AppControl::Quit {
                return AppControl::Quit;
            }
        }
        AppControl::Continue
    }

    fn dispatch(&mut self, intent: Intent) -> AppControl {
        let control = self.handle(intent);
        if !self.tracks_presses() {
            self.presses.reset();
        }
        control
    }

    pub fn handle(&mut self, intent: Intent) -> AppControl {
        if intent == Intent::ForceQuit {
            return AppControl::Quit;
        }
        self.status = None;

        let control = if self.dialog == Dialog::ConfirmExit {
            match intent {
                Intent::Confirm => AppControl::Quit,
                Intent::Back => {
                    self.dialog = Dialog::None;
                    AppControl::Continue
                }
                _ => AppControl::Continue,
            }
        } else if self.session.is_none() {
            self.handle_variant_select(intent)
        } else {
            match self.dialog {
                Dialog::DeadEnd => self.handle_dead_end_dialog(intent),
                Dialog::History { cursor } => self.handle_history_dialog(intent, cursor),
                _ => self.handle_match(intent),
            }
        };

        self.refresh();
        control
    }

    fn handle_variant_select(&mut self, intent: Intent) -> AppControl {
        let variant = match intent {
            Intent::Singles => GameVariant::Singles,
            Intent::Doubles => GameVariant::Doubles,
            Intent::Back => return AppControl::Quit,
            _ => return AppControl::Continue,
        };
        tracing::info!(variant = variant.as_str(), "match started");
        self.session = Some(Session {
            state: MatchState::new(variant),
            started: (self.clock)(),
            saved: false,
        });
        AppControl::Continue
    }

    fn handle_dead_end_dialog(&mut self, intent: Intent) -> AppControl {
        match intent {
            Intent::Confirm => {
                self.dialog = Dialog::None;
                if self.apply(ScoreEvent::ConfirmDeadEnd) {
                    self.status = Some("Dead End".to_string());
                }
            }
            Intent::ResetEnd => {
                self.dialog = Dialog::None;
                if self.apply(ScoreEvent::ResetEnd) {
                    self.status = Some("End reset".to_string());
                }
            }
            Intent::Back => self.dialog = Dialog::None,
            _ => {}
        }
        AppControl::Continue
    }

    fn handle_history_dialog(&mut self, intent: Intent, cursor: usize) -> AppControl {
        let len = self.snapshot.history.len();
        match intent {
            Intent::Tap(Side::Up) => {
                self.dialog = Dialog::History {
                    cursor: cursor.saturating_sub(1),
                };
            }
            Intent::Tap(Side::Down) => {
                self.dialog = Dialog::History {
                    cursor: (cursor + 1).min(len.saturating_sub(1)),
                };
            }
            Intent::Confirm | Intent::Add => {
                self.dialog = Dialog::None;
                // Cursor counts from the newest end.
                let Some(end) = len
                    .checked_sub(cursor + 1)
                    .and_then(|i| self.snapshot.history.get(i))
                    .map(|r| r.end)
                else {
                    return AppControl::Continue;
                };
                let event = if intent == Intent::Add {
                    ScoreEvent::StartAdd(end)
                } else {
                    ScoreEvent::StartEdit(end)
                };
                self.apply(event);
            }
            Intent::Back | Intent::History => self.dialog = Dialog::None,
            _ => {}
        }
        AppControl::Continue
    }

    fn handle_match(&mut self, intent: Intent) -> AppControl {
        let mode = self.mode();
        match (mode, intent) {
            (Mode::GameOver, Intent::NewGame) => {
                self.session = None;
                return AppControl::Continue;
            }
            (Mode::GameOver, Intent::Back) => return AppControl::Quit,
            (Mode::GameOver, _) => {}

            (_, Intent::Tap(side)) => {
                self.apply(ScoreEvent::Tap(side));
            }
            (_, Intent::LongPress(side)) => {
                self.apply(ScoreEvent::LongPress(side));
            }

            (Mode::ScoringEnd, Intent::Confirm) => {
                let end = self.snapshot.end_number;
                if self.apply(ScoreEvent::CommitEnd) {
                    self.notify(format!("End {end} saved!"));
                }
            }
            (Mode::Idle | Mode::ScoringEnd, Intent::DeadEnd) => {
                self.dialog = Dialog::DeadEnd;
            }
            (Mode::Idle | Mode::ScoringEnd, Intent::ResetEnd) => {
                if self.apply(ScoreEvent::ResetEnd) {
                    self.status = Some("End reset".to_string());
                }
            }
            (Mode::Idle, Intent::History) => {
                if self.snapshot.history.is_empty() {
                    self.status = Some("No ends yet".to_string());
                } else {
                    self.dialog = Dialog::History { cursor: 0 };
                }
            }
            (Mode::Idle, Intent::Finish) => {
                self.apply(ScoreEvent::Finish);
            }
            (Mode::ScoringEnd, Intent::History | Intent::Finish) => {
                self.status = Some("Finish the current end first".to_string());
            }
            (Mode::Idle | Mode::ScoringEnd, Intent::Back) => self.dialog = Dialog::ConfirmExit,

            (Mode::EditingEnd(end), Intent::Confirm) => {
                if self.apply(ScoreEvent::SaveEdit) {
                    self.notify(format!("End {end} updated"));
                }
            }
            (Mode::EditingEnd(_), Intent::Add) => {
                self.apply(ScoreEvent::PivotToAdd);
            }
            (Mode::EditingEnd(_), Intent::Back) => {
                self.apply(ScoreEvent::CancelEdit);
            }

            (Mode::AddingEnd(end), Intent::Confirm) => {
                let blank = self.snapshot.scratch_up == 0 && self.snapshot.scratch_down == 0;
                if self.apply(ScoreEvent::SaveAdd) && !blank {
                    self.notify(format!("End {end} added"));
                }
            }
            (Mode::AddingEnd(_), Intent::Back) => {
                self.apply(ScoreEvent::CancelAdd);
            }

            _ => tracing::debug!(?intent, mode = mode.as_str(), "intent ignored"),
        }
        AppControl::Continue
    }

    /// Set the status line unless this intent already set one (the save
    /// result on game over takes precedence).
    fn notify(&mut self, message: String) {
        self.status.get_or_insert(message);
    }

    fn mode(&self) -> Mode {
        self.session.as_ref().map_or(Mode::Idle, |s| s.state.mode())
    }

    fn apply(&mut self, event: ScoreEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let applied = session.state.apply(event);
        if !applied {
            tracing::debug!(event = event.as_str(), mode = session.state.mode().as_str(), "event rejected");
            return false;
        }
        tracing::debug!(
            event = event.as_str(),
            up = session.state.up_total(),
            down = session.state.down_total(),
            "event applied"
        );
        if session.state.game_over() && !session.saved {
            session.saved = true;
            tracing::info!(
                up = session.state.up_total(),
                down = session.state.down_total(),
                winner = session.state.winner().map_or("none", |s| s.as_str()),
                "game over"
            );
            self.save_finished();
        }
        true
    }

    /// Write the summary for the finished match, then hand it to the
    /// companion link. Runs once per match.
    fn save_finished(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let summary = MatchSummary::from_match(&session.state, session.started, (self.clock)());
        match self.store.save(&summary) {
            Ok(saved) => {
                if let Some(link) = &self.link {
                    self.sync_handle = Some(spawn_sync(Arc::clone(link), saved.clone(), self.sync_delete));
                }
                self.last_saved = Some(saved);
                self.status = Some("Match saved".to_string());
            }
            Err(err) => {
                tracing::error!(error = %err, "could not save match");
                self.status = Some("Save failed".to_string());
            }
        }
    }

    fn refresh(&mut self) {
        if let Some(session) = &self.session {
            session.state.snapshot_into(&mut self.snapshot);
        }
    }
}
