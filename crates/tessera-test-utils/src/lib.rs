//! Test utilities and mock engines for Tessera development.
//!
//! Provides a scripted [`MockFactory`] / [`MockEngine`] pair, a shared
//! [`Probe`] that records every call the adapter makes on them, and
//! ready-made distillers for the mock board observation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tessera_core::{DType, EngineAction, Observations};
use tessera_obs::{Board, BoardToArray, BoardToFeatureArray, Distill, Distilled, Distiller};

pub use fixtures::{MockEngine, MockFactory, MockGame};

#[derive(Default)]
struct ProbeState {
    created: Cell<usize>,
    begun: Cell<usize>,
    live: Cell<usize>,
    max_live: Cell<usize>,
    terminate: Cell<bool>,
    actions: RefCell<Vec<EngineAction>>,
    layouts: RefCell<Vec<Option<Vec<String>>>>,
}

/// Shared record of factory and engine calls.
///
/// Cloning yields another handle onto the same record, so a test can
/// keep one while the factory moves into the adapter.
#[derive(Clone, Default)]
pub struct Probe {
    inner: Rc<ProbeState>,
}

impl Probe {
    /// Engines created so far.
    pub fn created(&self) -> usize {
        self.inner.created.get()
    }

    /// `begin` calls so far.
    pub fn begun(&self) -> usize {
        self.inner.begun.get()
    }

    /// Engines currently alive.
    pub fn live(&self) -> usize {
        self.inner.live.get()
    }

    /// Most engines ever alive at once.
    pub fn max_live(&self) -> usize {
        self.inner.max_live.get()
    }

    /// Every action passed to `advance`, in order.
    pub fn actions(&self) -> Vec<EngineAction> {
        self.inner.actions.borrow().clone()
    }

    /// Layout argument of every `create` call, in order.
    pub fn layouts(&self) -> Vec<Option<Vec<String>>> {
        self.inner.layouts.borrow().clone()
    }

    /// Make every live and future engine report itself terminated.
    pub fn request_termination(&self, on: bool) {
        self.inner.terminate.set(on);
    }

    pub(crate) fn terminate_requested(&self) -> bool {
        self.inner.terminate.get()
    }

    pub(crate) fn record_create(&self, layout: Option<Vec<String>>) {
        let s = &self.inner;
        s.created.set(s.created.get() + 1);
        s.live.set(s.live.get() + 1);
        s.max_live.set(s.max_live.get().max(s.live.get()));
        s.layouts.borrow_mut().push(layout);
    }

    pub(crate) fn record_begin(&self) {
        self.inner.begun.set(self.inner.begun.get() + 1);
    }

    pub(crate) fn record_action(&self, action: EngineAction) {
        self.inner.actions.borrow_mut().push(action);
    }

    pub(crate) fn record_drop(&self) {
        self.inner.live.set(self.inner.live.get().saturating_sub(1));
    }
}

/// Bare-array distiller: raw character codes as `u8`.
pub fn raw_board_distiller() -> Distiller<Board> {
    Distiller::new(BoardToArray::raw(DType::U8))
}

/// Named distiller: `"chars"` (raw `u8` codes) and `"agent"` (one `f32`
/// plane marking `A`).
pub fn named_distiller() -> impl Distill<Board> {
    let chars = BoardToArray::raw(DType::U8);
    let agent = BoardToFeatureArray::new(vec![b'A']);
    move |board: &Board| -> Distilled {
        let mut out = Observations::new();
        if let Distilled::Board(a) = chars.distill(board) {
            out.insert("chars".to_string(), a);
        }
        if let Distilled::Board(a) = agent.distill(board) {
            out.insert("agent".to_string(), a);
        }
        Distilled::Named(out)
    }
}
