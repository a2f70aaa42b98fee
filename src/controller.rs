//! Wiring of host events to the engine
//!
//! In a browser every input arrives as a callback on one event loop. The
//! [`Controller`] keeps the engine, presenter and scheduler behind shared
//! handles so those callbacks can reach them. A player event that fires
//! while the engine is already busy (for example from inside a presenter
//! call) is dropped. Alarms are never dropped: they wait in a queue until the
//! engine is free again.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use derive_where::derive_where;

use crate::{
    AlarmMessage,
    engine::{IncomingMessage, QuizEngine},
    location::{Point, Verdict},
    session::{Presenter, Scheduler},
};

/// Trait for the host's inbound event registration
pub trait EventSource {
    /// Registers the handler called with the coordinates of a map double click
    fn on_map_double_click(&mut self, handler: Box<dyn FnMut(Point)>);

    /// Registers the handler called when the player asks for a restart
    fn on_restart_requested(&mut self, handler: Box<dyn FnMut()>);
}

/// Shared handle to an engine and its host collaborators
///
/// Cloning is cheap and every clone drives the same engine.
#[derive_where(Clone)]
pub struct Controller<P, S> {
    engine: Rc<RefCell<QuizEngine>>,
    presenter: Rc<P>,
    scheduler: Rc<RefCell<S>>,
    alarms: Rc<RefCell<VecDeque<AlarmMessage>>>,
}

impl<P: Presenter + 'static, S: Scheduler + 'static> Controller<P, S> {
    /// Wraps an engine with the presenter and scheduler of its host
    pub fn new(engine: QuizEngine, presenter: P, scheduler: S) -> Self {
        Self {
            engine: Rc::new(RefCell::new(engine)),
            presenter: Rc::new(presenter),
            scheduler: Rc::new(RefCell::new(scheduler)),
            alarms: Rc::default(),
        }
    }

    /// Registers guess and restart handlers on `source`
    pub fn bind<E: EventSource>(&self, source: &mut E) {
        let controller = self.clone();
        source.on_map_double_click(Box::new(move |point| {
            controller.guess(point);
        }));

        let controller = self.clone();
        source.on_restart_requested(Box::new(move || {
            controller.restart();
        }));
    }

    /// Renders the initial view
    pub fn start(&self) {
        match self.engine.try_borrow() {
            Ok(engine) => engine.start(self.presenter.as_ref()),
            Err(_) => log::debug!("engine busy, start dropped"),
        }
    }

    /// Submits a guess; `None` if it was ignored or dropped
    pub fn guess(&self, point: Point) -> Option<Verdict> {
        self.with_engine(|engine, presenter, scheduler| {
            engine.submit_guess(point, presenter, scheduler)
        })
        .flatten()
    }

    /// Restarts the quiz; `false` if the request was dropped
    pub fn restart(&self) -> bool {
        self.with_engine(|engine, presenter, scheduler| engine.restart(presenter, scheduler))
            .is_some()
    }

    /// Forwards a player message
    pub fn receive_message(&self, message: IncomingMessage) {
        self.with_engine(|engine, presenter, scheduler| {
            engine.receive_message(message, presenter, scheduler);
        });
    }

    /// Delivers an alarm the scheduler reports as due
    ///
    /// If the engine is busy the alarm is queued and delivered as soon as the
    /// engine is released.
    pub fn alarm(&self, message: AlarmMessage) {
        self.alarms.borrow_mut().push_back(message);
        self.deliver_alarms();
    }

    /// Reads the engine; `None` while it is busy
    pub fn inspect<R>(&self, f: impl FnOnce(&QuizEngine) -> R) -> Option<R> {
        self.deliver_alarms();
        self.engine.try_borrow().ok().map(|engine| f(&*engine))
    }

    /// Number of alarms waiting for the engine
    pub fn queued_alarms(&self) -> usize {
        self.alarms.borrow().len()
    }

    fn with_engine<R>(&self, f: impl FnOnce(&mut QuizEngine, &P, &mut S) -> R) -> Option<R> {
        self.deliver_alarms();

        let result = {
            let Ok(mut engine) = self.engine.try_borrow_mut() else {
                log::debug!("engine busy, event dropped");
                return None;
            };
            let Ok(mut scheduler) = self.scheduler.try_borrow_mut() else {
                log::debug!("scheduler busy, event dropped");
                return None;
            };

            f(&mut *engine, self.presenter.as_ref(), &mut *scheduler)
        };

        self.deliver_alarms();
        Some(result)
    }

    /// Feeds queued alarms to the engine until the queue is empty or the
    /// engine is busy
    ///
    /// Alarms raised while one is being handled join the queue and are picked
    /// up by the same loop.
    fn deliver_alarms(&self) {
        loop {
            let Ok(mut engine) = self.engine.try_borrow_mut() else {
                return;
            };
            let Ok(mut scheduler) = self.scheduler.try_borrow_mut() else {
                return;
            };
            let Some(message) = self.alarms.borrow_mut().pop_front() else {
                return;
            };

            engine.receive_alarm(message, self.presenter.as_ref(), &mut *scheduler);
        }
    }
}
