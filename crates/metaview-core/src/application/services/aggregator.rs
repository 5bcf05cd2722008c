//! Aggregator - collects asynchronous arrivals into one display model.
//!
//! Requests complete in any order. Each completion is posted as an
//! [`Arrival`] onto an unbounded queue; a single consumer owns the model,
//! merges arrivals and presents the model at most once.

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, trace};

use crate::application::ports::Presenter;
use crate::domain::{DisplayModel, TransferObject};

/// One completed request.
#[derive(Debug, Clone)]
pub enum Arrival {
    Data(TransferObject),
    /// The resource at `href` could not be fetched or parsed.
    Failed { href: String, reason: String },
}

/// Receiving side of the arrival queue.
pub type ArrivalQueue = mpsc::UnboundedReceiver<Arrival>;

/// Sending side of the arrival queue; cheap to clone, one per request.
#[derive(Debug, Clone)]
pub struct AggregatorHandle {
    tx: mpsc::UnboundedSender<Arrival>,
}

impl AggregatorHandle {
    pub fn send(&self, obj: TransferObject) {
        self.post(Arrival::Data(obj));
    }

    pub fn fail(&self, href: impl Into<String>, reason: impl ToString) {
        self.post(Arrival::Failed {
            href: href.into(),
            reason: reason.to_string(),
        });
    }

    /// Post an arrival. Once the consumer is gone the arrival is dropped.
    pub fn post(&self, arrival: Arrival) {
        if self.tx.send(arrival).is_err() {
            debug!("Aggregator gone, dropping late arrival");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns a display model and guards its single presentation.
#[derive(Debug)]
pub struct Aggregator<D> {
    model: D,
    failures: Vec<(String, String)>,
}

impl<D: DisplayModel> Aggregator<D> {
    pub fn new(model: D) -> Self {
        Self {
            model,
            failures: Vec::new(),
        }
    }

    /// A connected handle/queue pair.
    pub fn channel() -> (AggregatorHandle, ArrivalQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AggregatorHandle { tx }, rx)
    }

    /// Merge one arrival. After presentation data is still merged, but the
    /// model is never presented again.
    pub fn add_data(&mut self, obj: TransferObject) {
        if self.model.is_rendered() {
            trace!(kind = %obj.kind(), "Arrival after presentation");
        }
        self.model.add_data(obj);
    }

    pub fn add_failure(&mut self, href: &str, reason: &str) {
        debug!(href, reason, "Resource unavailable");
        self.failures.push((href.to_string(), reason.to_string()));
        self.model.add_failure(href, reason);
    }

    /// `(href, reason)` of every failed arrival, in arrival order.
    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }

    pub fn can_be_displayed(&self) -> bool {
        self.model.can_be_displayed()
    }

    /// The model, marked rendered, the first time it is displayable.
    pub fn take_for_display(&mut self) -> Option<&D> {
        if !self.model.can_be_displayed() {
            return None;
        }
        self.model.set_rendered();
        Some(&self.model)
    }

    pub fn model(&self) -> &D {
        &self.model
    }

    pub fn into_model(self) -> D {
        self.model
    }

    /// Consume the queue until every [`AggregatorHandle`] is dropped.
    ///
    /// `presenter` is called at most once, as soon as the model becomes
    /// displayable. Returns the aggregator for inspection.
    #[instrument(skip_all, fields(model = self.model.title()))]
    pub async fn run<P>(mut self, mut queue: ArrivalQueue, presenter: &mut P) -> Self
    where
        P: Presenter<D> + ?Sized,
    {
        let mut arrivals = 0usize;
        while let Some(arrival) = queue.recv().await {
            arrivals += 1;
            match arrival {
                Arrival::Data(obj) => self.add_data(obj),
                Arrival::Failed { href, reason } => self.add_failure(&href, &reason),
            }
            if let Some(model) = self.take_for_display() {
                info!(title = model.title(), "Presenting");
                presenter.present(model);
            }
        }
        debug!(arrivals, rendered = self.model.is_rendered(), "Arrival queue drained");
        self
    }
}
