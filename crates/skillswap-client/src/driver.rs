use std::collections::VecDeque;

use tracing::debug;

use crate::api::FeedbackApi;
use crate::effects::{ApiRequest, Effect, Notice, Route};
use crate::flow::{FlowOptions, RatingReviewFlow};
use crate::session::{FlowContext, Session};

/// Receives the user-visible side of the flow: toasts and navigation.
pub trait FlowObserver {
    fn notify(&mut self, notice: &Notice);

    fn navigate(&mut self, route: &Route);
}

/// Runs a [`RatingReviewFlow`] against a [`FeedbackApi`].
///
/// Effects are processed one at a time, in order; a request's response is fed
/// back into the flow before the next effect runs.
pub struct FlowDriver<A, O> {
    flow: RatingReviewFlow,
    api: A,
    observer: O,
}

impl<A, O> FlowDriver<A, O>
where
    A: FeedbackApi,
    O: FlowObserver,
{
    pub async fn mount(
        api: A,
        observer: O,
        session: &Session,
        context: FlowContext,
        options: FlowOptions,
    ) -> Self {
        let (flow, effects) = RatingReviewFlow::mount(session, context, options);
        let mut driver = Self {
            flow,
            api,
            observer,
        };
        driver.run(effects).await;
        driver
    }

    /// Applies a user action to the flow and performs what it asks for.
    pub async fn apply<F>(&mut self, action: F)
    where
        F: FnOnce(&mut RatingReviewFlow) -> Vec<Effect>,
    {
        let effects = action(&mut self.flow);
        self.run(effects).await;
    }

    pub async fn submit_rating(&mut self) {
        self.apply(RatingReviewFlow::submit_rating).await;
    }

    pub async fn continue_to_review(&mut self) {
        self.apply(RatingReviewFlow::continue_to_review).await;
    }

    pub async fn submit_review(&mut self) {
        self.apply(RatingReviewFlow::submit_review).await;
    }

    pub async fn skip_review(&mut self) {
        self.apply(RatingReviewFlow::skip_review).await;
    }

    pub async fn back_to_sessions(&mut self) {
        self.apply(RatingReviewFlow::back_to_sessions).await;
    }

    pub async fn run(&mut self, effects: Vec<Effect>) {
        let mut queue = VecDeque::from(effects);

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Notify(notice) => self.observer.notify(&notice),
                Effect::Navigate(route) => self.observer.navigate(&route),
                Effect::Send(request) => queue.extend(self.send(request).await),
            }
        }
    }

    async fn send(&mut self, request: ApiRequest) -> Vec<Effect> {
        debug!(?request, "Sending feedback request");

        match request {
            ApiRequest::LookupRatings { listing_id } => {
                let result = self.api.listing_ratings(&listing_id).await;
                self.flow.on_ratings_loaded(result)
            }
            ApiRequest::LookupReviews { listing_id } => {
                let result = self.api.listing_reviews(&listing_id).await;
                self.flow.on_reviews_loaded(result)
            }
            ApiRequest::CreateRating(dto) => {
                let result = self.api.create_rating(&dto).await;
                self.flow.on_rating_created(result)
            }
            ApiRequest::CreateReview(dto) => {
                let result = self.api.create_review(&dto).await;
                self.flow.on_review_created(result)
            }
        }
    }

    pub fn flow(&self) -> &RatingReviewFlow {
        &self.flow
    }

    /// For widget input that produces no effects: star hover/select, draft edits.
    pub fn flow_mut(&mut self) -> &mut RatingReviewFlow {
        &mut self.flow
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_parts(self) -> (RatingReviewFlow, A, O) {
        (self.flow, self.api, self.observer)
    }
}
